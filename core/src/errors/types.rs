//! Specific error types for strategy resolution, token verification and
//! token store construction.

use thiserror::Error;

/// Strategy registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("Strategy not valid for context: {name}")]
    NotValidForContext { name: String },
}

/// Token store verification outcomes that are errors
///
/// A present but wrong token is not represented here: stores report it as
/// a negative result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("The token does not exist")]
    NotFound,

    #[error("The token is expired")]
    Expired,
}

/// Token store construction and storage errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database connection is not valid")]
    DbConnectionNotValid,

    #[error("Table name is not valid: {name}")]
    TableNameNotValid { name: String },

    #[error("Hash cost out of range: {cost}")]
    InvalidHashCost { cost: u32 },

    #[error("Token lifetime out of range: {seconds}s")]
    TtlOutOfRange { seconds: i64 },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Token hashing failed: {message}")]
    Hashing { message: String },

    #[error("Corrupt session record: {message}")]
    CorruptRecord { message: String },
}
