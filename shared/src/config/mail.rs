//! Mail submission configuration module

use serde::{Deserialize, Serialize};

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP configuration for the email transport
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP server host name
    pub host: String,

    /// SMTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// From mailbox, e.g. `Sign-in <signin@example.com>`
    pub from: String,

    /// Authentication user name
    #[serde(default)]
    pub username: String,

    /// Authentication password
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Host presented during authentication, when it differs from `host`
    #[serde(default)]
    pub auth_host: Option<String>,
}

impl MailConfig {
    /// Load mail settings from environment variables
    ///
    /// Returns `None` unless `PWL_EMAIL_ADDR` is set, which keeps the
    /// email strategy disabled by default.
    pub fn from_env() -> Option<Self> {
        let addr = std::env::var("PWL_EMAIL_ADDR").ok().filter(|a| !a.is_empty())?;
        let (host, port) = split_host_port(&addr);

        Some(Self {
            host,
            port,
            from: std::env::var("PWL_EMAIL_FROM").unwrap_or_default(),
            username: std::env::var("PWL_EMAIL_AUTH_USERNAME").unwrap_or_default(),
            password: std::env::var("PWL_EMAIL_AUTH_PASSWORD").unwrap_or_default(),
            auth_host: std::env::var("PWL_EMAIL_AUTH_HOST").ok().filter(|h| !h.is_empty()),
        })
    }

    /// Host used for the authenticated relay connection
    pub fn relay_host(&self) -> &str {
        self.auth_host.as_deref().unwrap_or(&self.host)
    }

    /// Whether credentials were supplied
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Split `host:port`, defaulting the port when absent or malformed
pub fn split_host_port(addr: &str) -> (String, u16) {
    match addr.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (addr.to_string(), DEFAULT_SMTP_PORT),
        },
        None => (addr.to_string(), DEFAULT_SMTP_PORT),
    }
}

fn default_port() -> u16 {
    DEFAULT_SMTP_PORT
}
