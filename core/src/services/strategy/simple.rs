//! Strategy built from a generator and a transport

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use pwl_shared::config::Environment;

use crate::domain::value_objects::RequestContext;
use crate::errors::DomainResult;
use crate::services::generator::TokenGenerator;
use crate::services::transport::Transport;

use super::traits::Strategy;

/// Delegates generation to a generator and delivery to a transport
#[derive(Clone)]
pub struct SimpleStrategy {
    generator: Arc<dyn TokenGenerator>,
    transport: Arc<dyn Transport>,
    ttl: Duration,
    environments: Option<Vec<Environment>>,
}

impl SimpleStrategy {
    pub fn new(
        generator: Arc<dyn TokenGenerator>,
        transport: Arc<dyn Transport>,
        ttl: Duration,
    ) -> Self {
        Self {
            generator,
            transport,
            ttl,
            environments: None,
        }
    }

    /// Restrict the strategy to the given environments
    ///
    /// Requests from any other environment are rejected as not valid for
    /// their context.
    pub fn allow_only(mut self, environments: impl IntoIterator<Item = Environment>) -> Self {
        self.environments = Some(environments.into_iter().collect());
        self
    }

    pub fn environments(&self) -> Option<&[Environment]> {
        self.environments.as_deref()
    }
}

impl fmt::Debug for SimpleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleStrategy")
            .field("ttl", &self.ttl)
            .field("environments", &self.environments)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenGenerator for SimpleStrategy {
    async fn generate(&self, ctx: &RequestContext) -> DomainResult<String> {
        self.generator.generate(ctx).await
    }

    async fn sanitize(&self, ctx: &RequestContext, input: &str) -> DomainResult<String> {
        self.generator.sanitize(ctx, input).await
    }
}

#[async_trait]
impl Transport for SimpleStrategy {
    async fn send(
        &self,
        ctx: &RequestContext,
        token: &str,
        uid: &str,
        recipient: &str,
    ) -> DomainResult<()> {
        self.transport.send(ctx, token, uid, recipient).await
    }
}

impl Strategy for SimpleStrategy {
    fn ttl(&self, _ctx: &RequestContext) -> Duration {
        self.ttl
    }

    fn valid(&self, ctx: &RequestContext) -> bool {
        match &self.environments {
            Some(allowed) => allowed.contains(&ctx.environment()),
            None => true,
        }
    }
}
