//! In-process token store used by unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::expiry_after;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::traits::TokenStore;

/// Stores plaintext tokens in a map, with switches to inject failures
#[derive(Default)]
pub struct MockTokenStore {
    rows: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
    pub fail_store: bool,
    pub fail_verify: bool,
    pub fail_delete: bool,
    store_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MockTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_store() -> Self {
        Self {
            fail_store: true,
            ..Self::default()
        }
    }

    pub fn failing_verify() -> Self {
        Self {
            fail_verify: true,
            ..Self::default()
        }
    }

    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }

    pub fn stored_token(&self, uid: &str) -> Option<String> {
        self.rows.lock().unwrap().get(uid).map(|(token, _)| token.clone())
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn live_row(&self, uid: &str) -> DomainResult<(String, DateTime<Utc>)> {
        let rows = self.rows.lock().unwrap();
        let (token, expires) = rows.get(uid).cloned().ok_or(TokenError::NotFound)?;
        if Utc::now() > expires {
            return Err(TokenError::Expired.into());
        }
        Ok((token, expires))
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn store(&self, token: &str, uid: &str, ttl: Duration) -> DomainResult<()> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_store {
            return Err(DomainError::database("refused store"));
        }
        let expires = expiry_after(Utc::now(), ttl)?;
        self.rows
            .lock()
            .unwrap()
            .insert(uid.to_string(), (token.to_string(), expires));
        Ok(())
    }

    async fn exists(&self, uid: &str) -> DomainResult<(bool, Option<DateTime<Utc>>)> {
        let (_, expires) = self.live_row(uid)?;
        Ok((true, Some(expires)))
    }

    async fn verify(&self, token: &str, uid: &str) -> DomainResult<bool> {
        if self.fail_verify {
            return Err(DomainError::database("refused verify"));
        }
        let (stored, _) = self.live_row(uid)?;
        Ok(stored == token)
    }

    async fn delete(&self, uid: &str) -> DomainResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(DomainError::database("delete failure"));
        }
        self.rows.lock().unwrap().remove(uid);
        Ok(())
    }
}
