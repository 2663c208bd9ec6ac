//! Wiring of a ready-to-use `Passwordless` registry from configuration

use std::sync::Arc;

use chrono::Duration;
use pwl_core::services::generator::CrockfordGenerator;
use pwl_core::services::strategy::SimpleStrategy;
use pwl_core::services::transport::LogTransport;
use pwl_core::Passwordless;
use pwl_shared::config::{AppConfig, Environment};
use pwl_shared::url::signin_url;

use crate::database::{DatabasePool, SqliteTokenStore};
use crate::mail::{SigninEmailComposer, SmtpTransport};
use crate::InfrastructureError;

/// Strategy name used for SMTP delivery
pub const EMAIL_STRATEGY: &str = "email";
/// Strategy name used when no mail server is configured
pub const DEBUG_STRATEGY: &str = "debug";

/// Components created by [`build_passwordless`]
pub struct Bootstrap {
    pub passwordless: Arc<Passwordless<SqliteTokenStore>>,
    pub pool: DatabasePool,
    /// Name of the strategy that was registered
    pub strategy: &'static str,
    /// The debug transport, when the debug strategy was registered
    pub debug_transport: Option<Arc<LogTransport>>,
}

/// Open the database, prepare the session table and register strategies
///
/// With mail configured the `email` strategy is registered (SMTP delivery,
/// Crockford codes of the email length). Otherwise the `debug` strategy
/// logs sign-in links and is limited to non-production environments.
pub async fn build_passwordless(config: &AppConfig) -> Result<Bootstrap, InfrastructureError> {
    let ttl = Duration::try_minutes(config.strategy.token_ttl_minutes).ok_or_else(|| {
        InfrastructureError::Config(format!(
            "token TTL out of range: {} minutes",
            config.strategy.token_ttl_minutes
        ))
    })?;

    let pool = DatabasePool::new(config.database.clone()).await?;
    let store = SqliteTokenStore::from_pool(&pool)?;
    store.create_table().await?;

    let passwordless = Arc::new(Passwordless::new(Arc::new(store)));
    let endpoint = config.strategy.signin_endpoint();

    let (strategy, debug_transport) = match &config.mail {
        Some(mail) => {
            let composer = Arc::new(SigninEmailComposer::new(EMAIL_STRATEGY, endpoint));
            let transport = SmtpTransport::from_config(mail, composer)?;
            passwordless.set_transport(
                EMAIL_STRATEGY,
                Arc::new(transport),
                Arc::new(CrockfordGenerator::new(config.strategy.email_code_length)),
                ttl,
            );
            (EMAIL_STRATEGY, None)
        }
        None => {
            if config.environment.is_production() {
                tracing::warn!(
                    event = "debug_strategy_disabled",
                    "No mail server configured; the debug strategy rejects production requests"
                );
            }

            let transport = Arc::new(LogTransport::new(move |token, uid| {
                format!("Login at {}", signin_url(&endpoint, DEBUG_STRATEGY, token, uid))
            }));
            let strategy = SimpleStrategy::new(
                Arc::new(CrockfordGenerator::new(config.strategy.debug_code_length)),
                transport.clone(),
                ttl,
            )
            .allow_only(Environment::ALL.into_iter().filter(Environment::is_debug));
            passwordless.set_strategy(DEBUG_STRATEGY, Arc::new(strategy));
            (DEBUG_STRATEGY, Some(transport))
        }
    };

    tracing::info!(
        strategy = strategy,
        environment = %config.environment,
        table = %passwordless.store().table_name(),
        event = "passwordless_ready",
        "Passwordless initialised"
    );

    Ok(Bootstrap {
        passwordless,
        pool,
        strategy,
        debug_transport,
    })
}
