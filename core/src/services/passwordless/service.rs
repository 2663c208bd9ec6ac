//! Registry of named strategies bound to a token store

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::{RequestContext, VerifyOutcome};
use crate::errors::{DomainResult, StrategyError};
use crate::repositories::TokenStore;
use crate::services::generator::TokenGenerator;
use crate::services::strategy::{SimpleStrategy, Strategy};
use crate::services::transport::Transport;

use super::protocol;

/// Passwordless authentication entry point
///
/// Strategies are usually registered once at startup; lookups from
/// concurrent request handlers are safe and see either the old or the new
/// strategy when a name is overwritten.
pub struct Passwordless<T: TokenStore + ?Sized> {
    store: Arc<T>,
    strategies: RwLock<HashMap<String, Arc<dyn Strategy>>>,
}

impl<T: TokenStore + ?Sized> Passwordless<T> {
    /// Create a registry around a token store
    pub fn new(store: Arc<T>) -> Self {
        Self {
            store,
            strategies: RwLock::new(HashMap::new()),
        }
    }

    /// The backing token store
    pub fn store(&self) -> &Arc<T> {
        &self.store
    }

    /// Register or replace the strategy called `name`
    pub fn set_strategy(&self, name: impl Into<String>, strategy: Arc<dyn Strategy>) {
        let name = name.into();
        tracing::debug!(strategy = %name, event = "strategy_registered", "Registered strategy");
        self.strategies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, strategy);
    }

    /// Register a [`SimpleStrategy`] built from a transport and a generator
    pub fn set_transport(
        &self,
        name: impl Into<String>,
        transport: Arc<dyn Transport>,
        generator: Arc<dyn TokenGenerator>,
        ttl: Duration,
    ) -> Arc<dyn Strategy> {
        let strategy: Arc<dyn Strategy> = Arc::new(SimpleStrategy::new(generator, transport, ttl));
        self.set_strategy(name, Arc::clone(&strategy));
        strategy
    }

    /// Look up a strategy by name
    pub fn get_strategy(&self, name: &str) -> DomainResult<Arc<dyn Strategy>> {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| {
                StrategyError::UnknownStrategy {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Snapshot of the registered strategies
    ///
    /// With a context, only strategies valid for it are returned.
    pub fn list_strategies(
        &self,
        ctx: Option<&RequestContext>,
    ) -> HashMap<String, Arc<dyn Strategy>> {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, strategy)| ctx.map_or(true, |ctx| strategy.valid(ctx)))
            .map(|(name, strategy)| (name.clone(), Arc::clone(strategy)))
            .collect()
    }

    /// Issue and deliver a token for `uid` using the strategy `name`
    ///
    /// # Errors
    /// * `UnknownStrategy` - nothing is registered under `name`
    /// * `NotValidForContext` - the strategy refuses this request
    /// * any generation, delivery or storage error, unchanged
    /// * `DeadlineExceeded` - the context deadline passed
    pub async fn request_token(
        &self,
        ctx: &RequestContext,
        name: &str,
        uid: &str,
        recipient: &str,
    ) -> DomainResult<()> {
        let strategy = self.get_strategy(name)?;
        if !strategy.valid(ctx) {
            tracing::warn!(
                strategy = %name,
                environment = %ctx.environment(),
                event = "strategy_not_valid",
                "Strategy rejected the request context"
            );
            return Err(StrategyError::NotValidForContext {
                name: name.to_string(),
            }
            .into());
        }

        ctx.run(
            "request_token",
            protocol::request_token(ctx, self.store.as_ref(), strategy.as_ref(), uid, recipient),
        )
        .await
    }

    /// Verify `token` for `uid` and consume it on success
    ///
    /// The token is compared as given; use [`Self::verify_strategy_token`]
    /// for raw user input.
    pub async fn verify_token(
        &self,
        ctx: &RequestContext,
        uid: &str,
        token: &str,
    ) -> DomainResult<VerifyOutcome> {
        ctx.run("verify_token", protocol::verify_token(self.store.as_ref(), uid, token))
            .await
    }

    /// Sanitise user input with the strategy `name`, then verify it
    pub async fn verify_strategy_token(
        &self,
        ctx: &RequestContext,
        name: &str,
        uid: &str,
        token: &str,
    ) -> DomainResult<VerifyOutcome> {
        let strategy = self.get_strategy(name)?;
        let token = strategy.sanitize(ctx, token).await?;
        self.verify_token(ctx, uid, &token).await
    }

    /// Whether an unexpired token is stored for `uid`
    pub async fn token_exists(
        &self,
        ctx: &RequestContext,
        uid: &str,
    ) -> DomainResult<(bool, Option<DateTime<Utc>>)> {
        ctx.run("token_exists", self.store.exists(uid)).await
    }
}
