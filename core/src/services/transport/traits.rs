//! Transport capability trait

use async_trait::async_trait;

use crate::domain::value_objects::RequestContext;
use crate::errors::DomainResult;

/// Delivers a generated token to a recipient
///
/// Implementations either deliver the whole message or return an error;
/// a failed send must leave nothing observable behind.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `token` for `uid` to `recipient`
    async fn send(
        &self,
        ctx: &RequestContext,
        token: &str,
        uid: &str,
        recipient: &str,
    ) -> DomainResult<()>;
}
