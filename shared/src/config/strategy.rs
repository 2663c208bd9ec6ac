//! Strategy defaults: generator lengths, token lifetime and sign-in links

use serde::{Deserialize, Serialize};

use super::env_or;

/// Settings used when registering the built-in strategies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// Code length for the debug (log) strategy
    pub debug_code_length: usize,

    /// Code length for the email strategy
    pub email_code_length: usize,

    /// Token lifetime in minutes
    pub token_ttl_minutes: i64,

    /// Root URL of the web application, without trailing slash
    pub base_url: String,

    /// Path of the verification endpoint
    pub signin_path: String,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            debug_code_length: 4,
            email_code_length: 10,
            token_ttl_minutes: 30,
            base_url: String::from("http://localhost:8080"),
            signin_path: String::from("/account/token"),
        }
    }
}

impl StrategyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            debug_code_length: env_or("PWL_DEBUG_CODE_LENGTH", defaults.debug_code_length),
            email_code_length: env_or("PWL_EMAIL_CODE_LENGTH", defaults.email_code_length),
            token_ttl_minutes: env_or("PWL_TOKEN_TTL_MINUTES", defaults.token_ttl_minutes),
            base_url: std::env::var("PWL_BASE_URL")
                .ok()
                .filter(|url| !url.is_empty())
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            signin_path: std::env::var("PWL_SIGNIN_PATH").unwrap_or(defaults.signin_path),
        }
    }

    /// Fully qualified URL of the verification endpoint
    pub fn signin_endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.signin_path)
    }
}
