//! Generator capability trait

use async_trait::async_trait;

use crate::domain::value_objects::RequestContext;
use crate::errors::DomainResult;

/// Produces tokens and canonicalises user input
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    /// Produce a fresh token
    async fn generate(&self, ctx: &RequestContext) -> DomainResult<String>;

    /// Normalise a user-submitted token before comparison
    ///
    /// The default leaves the input untouched.
    async fn sanitize(&self, _ctx: &RequestContext, input: &str) -> DomainResult<String> {
        Ok(input.to_string())
    }
}
