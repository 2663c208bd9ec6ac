use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use pwl_shared::config::Environment;

use crate::domain::value_objects::{RequestContext, VerifyOutcome};
use crate::errors::ErrorKind;
use crate::repositories::token_store::mock::MockTokenStore;
use crate::repositories::TokenStore;
use crate::services::generator::CrockfordGenerator;
use crate::services::passwordless::Passwordless;
use crate::services::strategy::{SimpleStrategy, Strategy};
use crate::services::transport::LogTransport;

use super::mocks::{MockGenerator, MockStrategy, MockTransport};

fn registry() -> Passwordless<MockTokenStore> {
    Passwordless::new(Arc::new(MockTokenStore::new()))
}

#[tokio::test]
async fn test_request_and_verify_round_trip() {
    let pw = registry();
    let ctx = RequestContext::default();
    let transport = Arc::new(MockTransport::new());
    let generator = Arc::new(MockGenerator::new("1337"));

    let strategy = pw.set_transport("test", transport.clone(), generator, Duration::minutes(5));

    let listed = pw.list_strategies(None);
    assert_eq!(listed.len(), 1);
    assert!(Arc::ptr_eq(&listed["test"], &strategy));
    assert!(Arc::ptr_eq(&pw.get_strategy("test").unwrap(), &strategy));

    pw.request_token(&ctx, "test", "uid", "recipient").await.unwrap();
    let (token, _, recipient) = transport.last_sent().unwrap();
    assert_eq!(token, "1337");
    assert_eq!(recipient, "recipient");

    let outcome = pw.verify_token(&ctx, "uid", "badtoken").await.unwrap();
    assert!(!outcome.is_valid());

    let outcome = pw.verify_token(&ctx, "uid", &token).await.unwrap();
    assert!(matches!(outcome, VerifyOutcome::Valid));
}

#[tokio::test]
async fn test_unknown_strategy() {
    let pw = registry();

    let err = pw.get_strategy("madeup").map(|_| ()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownStrategy);

    let err = pw
        .request_token(&RequestContext::default(), "madeup", "", "")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownStrategy);
    assert_eq!(pw.store().store_calls(), 0);
}

#[tokio::test]
async fn test_strategy_not_valid_for_context() {
    let pw = registry();
    let strategy = Arc::new(MockStrategy::unfriendly());
    pw.set_strategy("unfriendly", strategy.clone());

    let err = pw
        .request_token(&RequestContext::default(), "unfriendly", "", "")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotValidForContext);
    assert_eq!(strategy.generator.calls(), 0);
    assert_eq!(strategy.transport.sent_count(), 0);
    assert_eq!(pw.store().store_calls(), 0);
}

#[tokio::test]
async fn test_set_strategy_overwrites() {
    let pw = registry();
    let first = Arc::new(MockStrategy::new(MockGenerator::new("AAAA"), MockTransport::new()));
    let second = Arc::new(MockStrategy::new(MockGenerator::new("BBBB"), MockTransport::new()));

    pw.set_strategy("email", first.clone());
    pw.set_strategy("email", second.clone());

    pw.request_token(&RequestContext::default(), "email", "uid", "r")
        .await
        .unwrap();

    assert_eq!(first.transport.sent_count(), 0);
    assert_eq!(second.transport.sent_count(), 1);
    assert_eq!(pw.list_strategies(None).len(), 1);
}

#[tokio::test]
async fn test_list_strategies_filters_by_context() {
    let pw = registry();
    let debug = SimpleStrategy::new(
        Arc::new(CrockfordGenerator::new(4)),
        Arc::new(LogTransport::default()),
        Duration::minutes(30),
    )
    .allow_only([Environment::Development]);
    pw.set_strategy("debug", Arc::new(debug));
    pw.set_strategy(
        "test",
        Arc::new(MockStrategy::new(MockGenerator::new("1"), MockTransport::new())),
    );

    assert_eq!(pw.list_strategies(None).len(), 2);

    let prod = RequestContext::new(Environment::Production);
    let listed = pw.list_strategies(Some(&prod));
    assert_eq!(listed.len(), 1);
    assert!(listed.contains_key("test"));

    let err = pw.request_token(&prod, "debug", "uid", "r").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotValidForContext);

    let dev = RequestContext::new(Environment::Development);
    assert_eq!(pw.list_strategies(Some(&dev)).len(), 2);
    pw.request_token(&dev, "debug", "uid", "r").await.unwrap();
}

#[tokio::test]
async fn test_verify_strategy_token_sanitizes_input() {
    let pw = registry();
    let ctx = RequestContext::default();
    pw.set_transport(
        "crockford",
        Arc::new(MockTransport::new()),
        Arc::new(CrockfordGenerator::new(8)),
        Duration::minutes(5),
    );

    pw.store()
        .store("AB1D0123", "alice", Duration::minutes(5))
        .await
        .unwrap();

    let outcome = pw
        .verify_strategy_token(&ctx, "crockford", "alice", "ab-ld-o123")
        .await
        .unwrap();
    assert!(matches!(outcome, VerifyOutcome::Valid));

    let err = pw
        .verify_strategy_token(&ctx, "missing", "alice", "x")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownStrategy);
}

#[tokio::test]
async fn test_token_exists() {
    let pw = registry();
    let ctx = RequestContext::default();
    pw.set_transport(
        "test",
        Arc::new(MockTransport::new()),
        Arc::new(MockGenerator::new("1337")),
        Duration::minutes(5),
    );

    let err = pw.token_exists(&ctx, "uid").await.unwrap_err();
    assert!(err.is_not_found());

    pw.request_token(&ctx, "test", "uid", "r").await.unwrap();
    let (exists, expires) = pw.token_exists(&ctx, "uid").await.unwrap();
    assert!(exists);
    assert!(expires.is_some());
}

#[tokio::test]
async fn test_verify_delete_failure_surfaces_partial_state() {
    let pw = Passwordless::new(Arc::new(MockTokenStore::failing_delete()));
    let ctx = RequestContext::default();
    pw.set_transport(
        "test",
        Arc::new(MockTransport::new()),
        Arc::new(MockGenerator::new("1337")),
        Duration::minutes(5),
    );

    pw.request_token(&ctx, "test", "uid", "r").await.unwrap();
    let outcome = pw.verify_token(&ctx, "uid", "1337").await.unwrap();

    assert!(outcome.is_valid());
    assert!(outcome.consume_error().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_request_token_honours_deadline() {
    let pw = registry();
    let transport = Arc::new(MockTransport::slow(StdDuration::from_secs(10)));
    pw.set_transport(
        "slow",
        transport.clone(),
        Arc::new(MockGenerator::new("1337")),
        Duration::minutes(5),
    );
    let ctx = RequestContext::default().with_timeout(StdDuration::from_secs(1));

    let err = pw.request_token(&ctx, "slow", "uid", "r").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DeadlineExceeded);
    assert_eq!(transport.sent_count(), 0);
    assert_eq!(pw.store().store_calls(), 0);
}

#[tokio::test]
async fn test_concurrent_lookups_during_registration() {
    let pw = Arc::new(registry());
    pw.set_transport(
        "test",
        Arc::new(MockTransport::new()),
        Arc::new(MockGenerator::new("1337")),
        Duration::minutes(5),
    );

    let mut handles = Vec::new();
    for i in 0..8 {
        let pw = Arc::clone(&pw);
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                pw.set_transport(
                    format!("extra-{i}"),
                    Arc::new(MockTransport::new()),
                    Arc::new(MockGenerator::new("x")),
                    Duration::minutes(1),
                );
            }
            pw.get_strategy("test").map(|s| s.ttl(&RequestContext::default()))
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), Duration::minutes(5));
    }
    assert_eq!(pw.list_strategies(None).len(), 5);
}
