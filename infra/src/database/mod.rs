//! Database module - SQLite implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The `TokenStore` implementation over a single session table

pub mod connection;
pub mod sqlite;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use sqlite::SqliteTokenStore;
