//! Shared utilities and common types for the passwordless workspace
//!
//! This crate provides functionality used across the core and infra crates:
//! - Configuration types loaded from the environment
//! - Recipient masking for logs
//! - Sign-in URL construction

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, MailConfig, StrategyConfig,
};
pub use utils::{masking, url};
