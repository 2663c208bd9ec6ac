//! # Passwordless Core
//!
//! Core logic for passwordless, token-based sign-in.
//! This crate contains the error taxonomy, the session entity, the
//! generator/transport/strategy capabilities, the token store contract and
//! the registry that runs the request/verify protocol. Concrete storage and
//! mail delivery live in `pwl_infra`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
