//! Session entity: the persisted record of a user's current token.

use chrono::{DateTime, Datelike, Duration, SecondsFormat, Utc};

use crate::errors::{DomainResult, StoreError};

/// Stored token state for one user
///
/// Only the one-way hash of the token is kept. At most one session exists
/// per `uid`; storing a new token for the same user replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// User identifier (unique key)
    pub uid: String,

    /// Salted, slow hash of the token
    pub token_hash: String,

    /// Timestamp after which the token is no longer accepted
    pub expires: DateTime<Utc>,

    /// Timestamp when the session row was first created
    pub created: DateTime<Utc>,
}

impl Session {
    /// Creates a session issued at `now` that lives for `ttl`
    ///
    /// A zero or negative `ttl` yields a session that is already expired.
    /// A `ttl` whose expiry cannot be represented is rejected.
    pub fn issue(
        uid: impl Into<String>,
        token_hash: impl Into<String>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            uid: uid.into(),
            token_hash: token_hash.into(),
            expires: expiry_after(now, ttl)?,
            created: now,
        })
    }

    /// Checks if the session has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires > now {
            self.expires - now
        } else {
            Duration::zero()
        }
    }
}

/// Compute `now + ttl`, rejecting expiries outside the four-digit year range
///
/// Stored timestamps must stay fixed-width for text ordering to hold.
pub fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DomainResult<DateTime<Utc>> {
    now.checked_add_signed(ttl)
        .filter(|expires| (0..=9999).contains(&expires.year()))
        .ok_or_else(|| {
            StoreError::TtlOutOfRange {
                seconds: ttl.num_seconds(),
            }
            .into()
        })
}

/// Format a timestamp as fixed-width UTC text (`YYYY-MM-DDTHH:MM:SS.ffffffZ`)
///
/// SQLite's date functions accept this form directly.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp written by [`format_timestamp`]
///
/// A parse failure is a store-level error, never a verification outcome.
pub fn parse_timestamp(value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| {
            StoreError::CorruptRecord {
                message: format!("invalid timestamp '{}': {}", value, e),
            }
            .into()
        })
}
