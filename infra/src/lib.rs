//! # Infrastructure Layer
//!
//! Concrete implementations behind the passwordless core:
//!
//! - **Database**: SQLite connection pool and the bcrypt-hashed token store
//! - **Mail**: SMTP transport submitting multipart sign-in emails
//! - **Telemetry**: `tracing` subscriber initialisation
//! - **Bootstrap**: wiring a configured `Passwordless` registry from `AppConfig`

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use pwl_core::errors::{DomainError, StoreError};

pub mod bootstrap;
pub mod database;
pub mod mail;
pub mod telemetry;

pub use bootstrap::{build_passwordless, Bootstrap};
pub use database::{DatabasePool, SqliteTokenStore};
pub use mail::{EmailComposer, EmailMessage, Mailer, SigninEmailComposer, SmtpTransport};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Message building or SMTP submission error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),

    /// Error raised by the core while wiring components
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => StoreError::Database {
                message: e.to_string(),
            }
            .into(),
            InfrastructureError::Mail(message) => DomainError::Delivery { message },
            InfrastructureError::Domain(e) => e,
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
