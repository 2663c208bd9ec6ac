//! End-to-end request/verify flows against the SQLite store

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;

use pwl_core::errors::{DomainError, DomainResult, ErrorKind};
use pwl_core::services::generator::CrockfordGenerator;
use pwl_core::services::transport::Transport;
use pwl_core::{Passwordless, RequestContext, TokenStore, VerifyOutcome};
use pwl_infra::database::{DatabasePool, SqliteTokenStore};
use pwl_shared::config::DatabaseConfig;

/// Captures the last token per uid, or refuses every delivery
#[derive(Default)]
struct CapturingTransport {
    sent: Mutex<Vec<(String, String)>>,
    refuse: bool,
}

impl CapturingTransport {
    fn token_for(&self, uid: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(_, sent_uid)| sent_uid == uid)
            .map(|(token, _)| token.clone())
    }
}

#[async_trait]
impl Transport for CapturingTransport {
    async fn send(
        &self,
        _ctx: &RequestContext,
        token: &str,
        uid: &str,
        _recipient: &str,
    ) -> DomainResult<()> {
        if self.refuse {
            return Err(DomainError::delivery("mailbox unavailable"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((token.to_string(), uid.to_string()));
        Ok(())
    }
}

async fn setup() -> Passwordless<SqliteTokenStore> {
    let pool = DatabasePool::new(DatabaseConfig::default().with_hash_cost(4))
        .await
        .unwrap();
    let store = SqliteTokenStore::from_pool(&pool).unwrap();
    store.create_table().await.unwrap();
    Passwordless::new(Arc::new(store))
}

#[tokio::test]
async fn test_request_verify_consume() {
    let pw = setup().await;
    let transport = Arc::new(CapturingTransport::default());
    pw.set_transport(
        "email",
        transport.clone(),
        Arc::new(CrockfordGenerator::new(10)),
        Duration::minutes(30),
    );
    let ctx = RequestContext::default();

    pw.request_token(&ctx, "email", "alice", "alice@example.com")
        .await
        .unwrap();
    let token = transport.token_for("alice").unwrap();

    let outcome = pw
        .verify_strategy_token(&ctx, "email", "alice", "WRONGTOKEN")
        .await
        .unwrap();
    assert!(matches!(outcome, VerifyOutcome::Invalid));

    let typed = format!("{}-{}", &token[..5], &token[5..]).to_lowercase();
    let outcome = pw
        .verify_strategy_token(&ctx, "email", "alice", &typed)
        .await
        .unwrap();
    assert!(matches!(outcome, VerifyOutcome::Valid));

    // One-time use: the row is gone after a successful verification.
    let err = pw.verify_token(&ctx, "alice", &token).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenNotFound);
}

#[tokio::test]
async fn test_failed_send_leaves_no_row() {
    let pw = setup().await;
    pw.set_transport(
        "email",
        Arc::new(CapturingTransport {
            refuse: true,
            ..Default::default()
        }),
        Arc::new(CrockfordGenerator::new(10)),
        Duration::minutes(30),
    );
    let ctx = RequestContext::default();

    let err = pw
        .request_token(&ctx, "email", "bob", "bob@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Delivery);

    let err = pw.store().exists("bob").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenNotFound);
}

#[tokio::test]
async fn test_unknown_strategy_touches_nothing() {
    let pw = setup().await;
    let ctx = RequestContext::default();

    let err = pw
        .request_token(&ctx, "sms", "carol", "+15550001111")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownStrategy);

    let err = pw.token_exists(&ctx, "carol").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenNotFound);
}

#[tokio::test]
async fn test_concurrent_requests_for_distinct_users() {
    let pw = Arc::new(setup().await);
    let transport = Arc::new(CapturingTransport::default());
    pw.set_transport(
        "email",
        transport.clone(),
        Arc::new(CrockfordGenerator::new(10)),
        Duration::minutes(30),
    );

    let mut handles = Vec::new();
    for i in 0..10 {
        let pw = Arc::clone(&pw);
        handles.push(tokio::spawn(async move {
            let uid = format!("user{i}");
            pw.request_token(&RequestContext::default(), "email", &uid, "x@example.com")
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let ctx = RequestContext::default();
    for i in 0..10 {
        let uid = format!("user{i}");
        let token = transport.token_for(&uid).unwrap();
        let outcome = pw.verify_token(&ctx, &uid, &token).await.unwrap();
        assert!(outcome.is_consumed(), "uid {uid}");
    }
}

#[tokio::test]
async fn test_concurrent_requests_for_same_user_keep_one_row() {
    let pw = Arc::new(setup().await);
    let transport = Arc::new(CapturingTransport::default());
    pw.set_transport(
        "email",
        transport.clone(),
        Arc::new(CrockfordGenerator::new(10)),
        Duration::minutes(30),
    );

    let mut handles = Vec::new();
    for _ in 0..5 {
        let pw = Arc::clone(&pw);
        handles.push(tokio::spawn(async move {
            pw.request_token(&RequestContext::default(), "email", "dave", "dave@example.com")
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let ctx = RequestContext::default();
    let tokens: Vec<String> = transport
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|(token, _)| token.clone())
        .collect();
    assert_eq!(tokens.len(), 5);

    let mut valid = 0;
    for token in &tokens {
        match pw.verify_token(&ctx, "dave", token).await {
            Ok(outcome) if outcome.is_valid() => valid += 1,
            Ok(_) => {}
            Err(e) => assert_eq!(e.kind(), ErrorKind::TokenNotFound),
        }
    }
    assert_eq!(valid, 1);
}

#[tokio::test]
async fn test_overlapping_verifications_leave_token_consumed() {
    let pw = Arc::new(setup().await);
    let transport = Arc::new(CapturingTransport::default());
    pw.set_transport(
        "email",
        transport.clone(),
        Arc::new(CrockfordGenerator::new(10)),
        Duration::minutes(30),
    );
    let ctx = RequestContext::default();

    pw.request_token(&ctx, "email", "erin", "erin@example.com")
        .await
        .unwrap();
    let token = transport.token_for("erin").unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let pw = Arc::clone(&pw);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            pw.verify_token(&RequestContext::default(), "erin", &token).await
        }));
    }

    let mut valid = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(outcome) => {
                assert!(matches!(outcome, VerifyOutcome::Valid));
                valid += 1;
            }
            Err(e) => assert_eq!(e.kind(), ErrorKind::TokenNotFound),
        }
    }
    assert!(valid >= 1);

    let err = pw.token_exists(&ctx, "erin").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenNotFound);
    let err = pw.verify_token(&ctx, "erin", &token).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenNotFound);
}
