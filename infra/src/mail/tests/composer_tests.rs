//! Tests for sign-in email composition

use lettre::message::Mailbox;

use crate::mail::{BodyKind, EmailComposer, EmailMessage, SigninEmailComposer};

fn composer() -> SigninEmailComposer {
    SigninEmailComposer::new("email", "http://localhost:8080/account/token")
}

#[test]
fn test_compose_contains_code_and_link() {
    let email = composer()
        .compose("ABCDE12345", "alice@example.com", "alice@example.com")
        .unwrap();

    let link = "http://localhost:8080/account/token?strategy=email&token=ABCDE12345&uid=alice%40example.com";

    assert_eq!(email.to(), "alice@example.com");
    assert_eq!(email.subject(), "Passwordless sign-in");

    let text = email.body(BodyKind::Plain).unwrap();
    assert!(text.contains("Your code is ABCDE12345"));
    assert!(text.contains(link));

    let html = email.body(BodyKind::Html).unwrap();
    assert!(html.contains("<b>ABCDE12345</b>"));
    assert!(html.contains(&link.replace('&', "&amp;")));
}

#[test]
fn test_bodies_ordered_plain_then_html() {
    let email = composer().compose("T", "u", "u@example.com").unwrap();
    let kinds: Vec<BodyKind> = email.bodies().iter().map(|body| body.kind).collect();
    assert_eq!(kinds, vec![BodyKind::Plain, BodyKind::Html]);
}

#[test]
fn test_site_name_is_escaped_in_html() {
    let email = composer()
        .with_site_name("Tom & Jerry")
        .compose("T", "u", "u@example.com")
        .unwrap();

    assert_eq!(email.subject(), "Tom & Jerry sign-in");
    assert!(email.body(BodyKind::Html).unwrap().contains("Tom &amp; Jerry"));
}

#[test]
fn test_into_message_builds_multipart_alternative() {
    let from: Mailbox = "Sign-in <signin@example.com>".parse().unwrap();
    let message = EmailMessage::new("bob@example.com", "Sign in")
        .with_body(BodyKind::Plain, "plain body")
        .with_body(BodyKind::Html, "<p>html body</p>")
        .into_message(&from)
        .unwrap();

    let recipients: Vec<String> = message.envelope().to().iter().map(ToString::to_string).collect();
    assert_eq!(recipients, vec!["bob@example.com".to_string()]);

    let raw = String::from_utf8(message.formatted()).unwrap();
    assert!(raw.contains("Subject: Sign in"));
    assert!(raw.contains("multipart/alternative"));

    let plain = raw.find("text/plain").unwrap();
    let html = raw.find("text/html").unwrap();
    assert!(plain < html);
}

#[test]
fn test_into_message_rejects_empty_and_bad_recipient() {
    let from: Mailbox = "signin@example.com".parse().unwrap();

    assert!(EmailMessage::new("bob@example.com", "Sign in")
        .into_message(&from)
        .is_err());

    assert!(EmailMessage::new("not an address", "Sign in")
        .with_body(BodyKind::Plain, "body")
        .into_message(&from)
        .is_err());
}
