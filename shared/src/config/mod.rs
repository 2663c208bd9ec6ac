//! Configuration module with area-specific sub-modules
//!
//! - `database` - SQLite connection pool and token store settings
//! - `environment` - Environment detection and logging configuration
//! - `mail` - SMTP submission settings for the email transport
//! - `strategy` - Generator lengths, TTL and sign-in link settings

pub mod database;
pub mod environment;
pub mod mail;
pub mod strategy;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use strategy::StrategyConfig;

/// Complete configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,

    /// Database and token store configuration
    pub database: DatabaseConfig,

    /// Strategy defaults
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// SMTP configuration; `None` disables the email strategy
    #[serde(default)]
    pub mail: Option<MailConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            strategy: StrategyConfig::default(),
            mail: None,
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file is read first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            database: DatabaseConfig::from_env(),
            strategy: StrategyConfig::from_env(),
            mail: MailConfig::from_env(),
            logging,
        }
    }

    /// Whether outbound email delivery is configured
    pub fn mail_enabled(&self) -> bool {
        self.mail.is_some()
    }
}

/// Read and parse an environment variable, falling back to `default`
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
