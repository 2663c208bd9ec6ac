//! Database configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Default name of the session table
pub const DEFAULT_TABLE_NAME: &str = "session";

/// Default bcrypt cost for token hashes
pub const DEFAULT_HASH_COST: u32 = 12;

/// Database configuration for the SQLite token store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Name of the table holding session rows
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// bcrypt cost factor used when hashing tokens
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("sqlite::memory:"),
            max_connections: 5,
            connect_timeout: 30,
            table_name: default_table_name(),
            hash_cost: default_hash_cost(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            connect_timeout: env_or("DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout),
            table_name: std::env::var("PWL_TABLE_NAME")
                .ok()
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.table_name),
            hash_cost: env_or("PWL_HASH_COST", defaults.hash_cost),
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the session table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Set the bcrypt cost factor
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Whether the URL points at a private in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_hash_cost() -> u32 {
    DEFAULT_HASH_COST
}
