//! Token store trait defining the persistence contract for session rows.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::errors::DomainResult;

/// Persistence contract for the current token of each user
///
/// At most one token is live per uid: storing a new one replaces the
/// previous. Implementations keep only a one-way hash of the token.
///
/// Error taxonomy shared by every backend:
/// - no row for the uid is `TokenError::NotFound`
/// - a row past its expiry is `TokenError::Expired`
/// - a present, unexpired row with a different token is `Ok(false)`
///
/// Dropping a returned future cancels the operation; backends must not
/// leave a partially written row behind.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist `token` for `uid`, replacing any existing row
    ///
    /// The row expires at `now + ttl`. A zero or negative TTL stores an
    /// already-expired row.
    async fn store(&self, token: &str, uid: &str, ttl: Duration) -> DomainResult<()>;

    /// Report whether an unexpired token is stored for `uid`
    ///
    /// # Returns
    /// * `Ok((true, Some(expires)))` - A live token exists
    /// * `Err(TokenError::Expired)` - The stored token has lapsed
    /// * `Err(TokenError::NotFound)` - Nothing is stored for the uid
    async fn exists(&self, uid: &str) -> DomainResult<(bool, Option<DateTime<Utc>>)>;

    /// Compare `token` with the stored hash for `uid`
    ///
    /// Expiry is checked before any hash comparison.
    ///
    /// # Returns
    /// * `Ok(true)` - The token matches
    /// * `Ok(false)` - A live token exists but does not match
    /// * `Err(TokenError::NotFound | TokenError::Expired)` - No live token
    async fn verify(&self, token: &str, uid: &str) -> DomainResult<bool>;

    /// Remove the row for `uid`; removing a missing row succeeds
    ///
    /// Not conditioned on a prior `verify`, so a token stored in between is
    /// removed as well.
    async fn delete(&self, uid: &str) -> DomainResult<()>;
}
