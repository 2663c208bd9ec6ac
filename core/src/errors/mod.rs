//! Domain error types and error handling.

mod types;


pub use types::{StoreError, StrategyError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Token generation failed: {message}")]
    Generation { message: String },

    #[error("Token delivery failed: {message}")]
    Delivery { message: String },

    #[error("Deadline exceeded during {operation}")]
    DeadlineExceeded { operation: &'static str },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Programmatic classification of a [`DomainError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownStrategy,
    NotValidForContext,
    TokenNotFound,
    TokenExpired,
    DbConnectionNotValid,
    TableNameNotValid,
    Storage,
    Generation,
    Delivery,
    DeadlineExceeded,
    Internal,
}

impl DomainError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Generation { .. } => ErrorKind::Generation,
            DomainError::Delivery { .. } => ErrorKind::Delivery,
            DomainError::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Strategy(StrategyError::UnknownStrategy { .. }) => ErrorKind::UnknownStrategy,
            DomainError::Strategy(StrategyError::NotValidForContext { .. }) => {
                ErrorKind::NotValidForContext
            }
            DomainError::Token(TokenError::NotFound) => ErrorKind::TokenNotFound,
            DomainError::Token(TokenError::Expired) => ErrorKind::TokenExpired,
            DomainError::Store(StoreError::DbConnectionNotValid) => ErrorKind::DbConnectionNotValid,
            DomainError::Store(StoreError::TableNameNotValid { .. }) => ErrorKind::TableNameNotValid,
            DomainError::Store(_) => ErrorKind::Storage,
        }
    }

    /// Shorthand for a generation failure
    pub fn generation(message: impl Into<String>) -> Self {
        DomainError::Generation {
            message: message.into(),
        }
    }

    /// Shorthand for a delivery failure
    pub fn delivery(message: impl Into<String>) -> Self {
        DomainError::Delivery {
            message: message.into(),
        }
    }

    /// Shorthand for a database failure
    pub fn database(message: impl Into<String>) -> Self {
        DomainError::Store(StoreError::Database {
            message: message.into(),
        })
    }

    /// True when no token is stored for the user
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::TokenNotFound
    }

    /// True when the stored token has lapsed
    pub fn is_expired(&self) -> bool {
        self.kind() == ErrorKind::TokenExpired
    }
}
