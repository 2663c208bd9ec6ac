//! SQLite implementation of the TokenStore trait.
//!
//! One row per uid holds the bcrypt hash of the user's current token and its
//! expiry. Writes are a single upsert statement, so concurrent requests for
//! the same uid resolve in the database (last writer wins) and a cancelled
//! write never leaves a partial row.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::{Row, SqlitePool};

use pwl_core::domain::entities::{expiry_after, format_timestamp, parse_timestamp, Session};
use pwl_core::errors::{DomainError, DomainResult, StoreError, TokenError};
use pwl_core::repositories::TokenStore;
use pwl_shared::config::database::DEFAULT_TABLE_NAME;
use pwl_shared::masking::mask_recipient;

use crate::database::DatabasePool;

/// Lowest cost accepted by bcrypt
pub const MIN_HASH_COST: u32 = 4;
/// Highest cost accepted by bcrypt
pub const MAX_HASH_COST: u32 = 31;

#[allow(clippy::unwrap_used)]
static TABLE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").unwrap());

/// SQLite-backed token store
///
/// Tokens are hashed with bcrypt before storage and compared with
/// `bcrypt::verify`; the plaintext never reaches the database. Expiry is
/// checked before any hash comparison.
#[derive(Clone)]
pub struct SqliteTokenStore {
    /// Database connection pool
    pool: SqlitePool,
    /// Validated session table name
    table_name: String,
    /// bcrypt cost factor
    hash_cost: u32,
}

impl SqliteTokenStore {
    /// Create a store over `pool` using `table_name`
    ///
    /// An empty name selects the default `session` table.
    ///
    /// # Errors
    /// * `StoreError::DbConnectionNotValid` - the pool is closed
    /// * `StoreError::TableNameNotValid` - the name is not a plain SQL identifier
    pub fn new(pool: SqlitePool, table_name: &str) -> DomainResult<Self> {
        if pool.is_closed() {
            return Err(StoreError::DbConnectionNotValid.into());
        }

        let table_name = if table_name.is_empty() {
            DEFAULT_TABLE_NAME
        } else {
            table_name
        };
        if !TABLE_NAME_REGEX.is_match(table_name) {
            return Err(StoreError::TableNameNotValid {
                name: table_name.to_string(),
            }
            .into());
        }

        Ok(Self {
            pool,
            table_name: table_name.to_string(),
            hash_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Create a store from a [`DatabasePool`] and its configured table and cost
    pub fn from_pool(pool: &DatabasePool) -> DomainResult<Self> {
        let config = pool.config();
        Self::new(pool.get_pool().clone(), &config.table_name)?.with_hash_cost(config.hash_cost)
    }

    /// Set the bcrypt cost factor (4..=31)
    pub fn with_hash_cost(mut self, cost: u32) -> DomainResult<Self> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(StoreError::InvalidHashCost { cost }.into());
        }
        self.hash_cost = cost;
        Ok(self)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn hash_cost(&self) -> u32 {
        self.hash_cost
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the session table if it does not exist
    pub async fn create_table(&self) -> DomainResult<()> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{}" (
                uid        TEXT PRIMARY KEY NOT NULL,
                token_hash TEXT NOT NULL,
                expires    TEXT NOT NULL,
                created    TEXT NOT NULL
            )
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("create session table", e))?;

        tracing::debug!(table = %self.table_name, event = "session_table_ready", "Session table ready");
        Ok(())
    }

    /// Delete every expired row and return how many were removed
    ///
    /// Nothing calls this automatically; expired rows are otherwise only
    /// observed lazily by `exists` and `verify`.
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let query = format!(r#"DELETE FROM "{}" WHERE expires < ?"#, self.table_name);

        let result = sqlx::query(&query)
            .bind(format_timestamp(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("purge expired sessions", e))?;

        let purged = result.rows_affected();
        tracing::info!(purged = purged, event = "sessions_purged", "Purged expired sessions");
        Ok(purged)
    }

    /// Load the session row for `uid`
    async fn fetch_session(&self, uid: &str) -> DomainResult<Session> {
        let query = format!(
            r#"SELECT uid, token_hash, expires, created FROM "{}" WHERE uid = ?"#,
            self.table_name
        );

        let row = sqlx::query(&query)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("load session", e))?
            .ok_or(TokenError::NotFound)?;

        Self::row_to_session(&row)
    }

    /// Convert database row to Session entity
    fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> DomainResult<Session> {
        let column = |name: &str| -> DomainResult<String> {
            row.try_get::<String, _>(name).map_err(|e| {
                StoreError::CorruptRecord {
                    message: format!("column {}: {}", name, e),
                }
                .into()
            })
        };

        Ok(Session {
            uid: column("uid")?,
            token_hash: column("token_hash")?,
            expires: parse_timestamp(&column("expires")?)?,
            created: parse_timestamp(&column("created")?)?,
        })
    }

    async fn hash_token(&self, token: &str) -> DomainResult<String> {
        let token = token.to_string();
        let cost = self.hash_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(token, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("hashing task failed: {}", e),
            })?
            .map_err(hashing_error)
    }

    async fn token_matches(token: &str, token_hash: &str) -> DomainResult<bool> {
        let token = token.to_string();
        let token_hash = token_hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(token, &token_hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("hashing task failed: {}", e),
            })?
            .map_err(hashing_error)
    }

    /// Load the row for `uid` and reject it when expired
    async fn live_session(&self, uid: &str) -> DomainResult<Session> {
        let session = self.fetch_session(uid).await?;
        if session.is_expired() {
            return Err(TokenError::Expired.into());
        }
        Ok(session)
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn store(&self, token: &str, uid: &str, ttl: Duration) -> DomainResult<()> {
        let now = Utc::now();
        expiry_after(now, ttl)?;
        let token_hash = self.hash_token(token).await?;
        let session = Session::issue(uid, token_hash, ttl, now)?;

        let query = format!(
            r#"
            INSERT INTO "{}" (uid, token_hash, expires, created)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(uid) DO UPDATE SET
                token_hash = excluded.token_hash,
                expires = excluded.expires
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .bind(&session.uid)
            .bind(&session.token_hash)
            .bind(format_timestamp(session.expires))
            .bind(format_timestamp(session.created))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("store session", e))?;

        tracing::debug!(
            uid = %mask_recipient(uid),
            expires = %session.expires,
            remaining_secs = session.time_until_expiration().num_seconds(),
            event = "token_stored",
            "Stored token hash"
        );

        Ok(())
    }

    async fn exists(&self, uid: &str) -> DomainResult<(bool, Option<DateTime<Utc>>)> {
        let session = self.live_session(uid).await?;
        Ok((true, Some(session.expires)))
    }

    async fn verify(&self, token: &str, uid: &str) -> DomainResult<bool> {
        let session = self.live_session(uid).await?;
        Self::token_matches(token, &session.token_hash).await
    }

    async fn delete(&self, uid: &str) -> DomainResult<()> {
        let query = format!(r#"DELETE FROM "{}" WHERE uid = ?"#, self.table_name);

        sqlx::query(&query)
            .bind(uid)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete session", e))?;

        tracing::debug!(uid = %mask_recipient(uid), event = "token_deleted", "Deleted session");
        Ok(())
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, action = action, event = "session_query_failed", "Session query failed");
    DomainError::database(format!("failed to {}: {}", action, e))
}

fn hashing_error(e: bcrypt::BcryptError) -> DomainError {
    StoreError::Hashing {
        message: e.to_string(),
    }
    .into()
}
