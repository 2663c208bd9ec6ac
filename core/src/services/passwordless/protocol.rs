//! Request and verify steps shared by every registry

use pwl_shared::masking::mask_recipient;

use crate::domain::value_objects::{RequestContext, VerifyOutcome};
use crate::errors::DomainResult;
use crate::repositories::TokenStore;
use crate::services::strategy::Strategy;

/// Generate a token, deliver it, then persist its hash
///
/// The stages run strictly in that order and the first failure is returned
/// unchanged. The store is never touched when delivery fails, so a retry
/// always issues a fresh token.
pub async fn request_token<T, S>(
    ctx: &RequestContext,
    store: &T,
    strategy: &S,
    uid: &str,
    recipient: &str,
) -> DomainResult<()>
where
    T: TokenStore + ?Sized,
    S: Strategy + ?Sized,
{
    let token = strategy.generate(ctx).await?;

    strategy.send(ctx, &token, uid, recipient).await.map_err(|e| {
        tracing::warn!(
            uid = %mask_recipient(uid),
            recipient = %mask_recipient(recipient),
            error = %e,
            event = "token_delivery_failed",
            "Failed to deliver sign-in token"
        );
        e
    })?;

    store.store(&token, uid, strategy.ttl(ctx)).await?;

    tracing::info!(
        uid = %mask_recipient(uid),
        recipient = %mask_recipient(recipient),
        event = "token_requested",
        "Sign-in token delivered and stored"
    );

    Ok(())
}

/// Check `token` for `uid` and consume it when it matches
///
/// A failed delete after a successful match yields
/// [`VerifyOutcome::ValidUnconsumed`]: the user is authenticated but the
/// token may still be replayed until it expires.
///
/// The match and the delete are separate store calls. Two verifications of
/// the same token that overlap can therefore both return
/// [`VerifyOutcome::Valid`]; once either delete lands, later attempts see
/// `TokenError::NotFound`. Callers that need single use under concurrency
/// must serialise verifications per `uid`.
pub async fn verify_token<T>(store: &T, uid: &str, token: &str) -> DomainResult<VerifyOutcome>
where
    T: TokenStore + ?Sized,
{
    if !store.verify(token, uid).await? {
        tracing::info!(
            uid = %mask_recipient(uid),
            event = "token_rejected",
            "Supplied token does not match"
        );
        return Ok(VerifyOutcome::Invalid);
    }

    match store.delete(uid).await {
        Ok(()) => {
            tracing::info!(
                uid = %mask_recipient(uid),
                event = "token_verified",
                "Sign-in token verified and consumed"
            );
            Ok(VerifyOutcome::Valid)
        }
        Err(e) => {
            tracing::error!(
                uid = %mask_recipient(uid),
                error = %e,
                event = "token_consume_failed",
                "Token verified but could not be deleted"
            );
            Ok(VerifyOutcome::ValidUnconsumed(e))
        }
    }
}
