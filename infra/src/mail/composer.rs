//! Rendering of sign-in emails

use pwl_core::errors::DomainResult;
use pwl_shared::url::signin_url;

use super::message::{BodyKind, EmailMessage};

/// Renders the email carrying a token
pub trait EmailComposer: Send + Sync {
    fn compose(&self, token: &str, uid: &str, recipient: &str) -> DomainResult<EmailMessage>;
}

/// Default sign-in email: the code plus a one-click link
///
/// The link is `{endpoint}?strategy={strategy}&token={token}&uid={uid}`
/// with every parameter query-encoded.
#[derive(Debug, Clone)]
pub struct SigninEmailComposer {
    strategy: String,
    endpoint: String,
    site_name: String,
}

impl SigninEmailComposer {
    /// Compose emails for `strategy`, linking to the verification `endpoint`
    pub fn new(strategy: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            endpoint: endpoint.into(),
            site_name: String::from("Passwordless"),
        }
    }

    /// Name of the site shown in the subject and body
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    fn text_body(&self, token: &str, link: &str) -> String {
        format!(
            "You (or someone who knows your email address) wants to sign in to {site}.\n\n\
             Your code is {token} - or use the following link: {link}\n\n\
             (If you did not request or were not expecting this email, you can safely ignore it.)",
            site = self.site_name,
        )
    }

    fn html_body(&self, token: &str, link: &str) -> String {
        format!(
            "<!doctype html><html><body>\
             <p>You (or someone who knows your email address) wants to sign in to {site}.</p>\
             <p>Your code is <b>{token}</b> - or <a href=\"{link}\">click here</a> to sign in automatically.</p>\
             <p>(If you did not request or were not expecting this email, you can safely ignore it.)</p>\
             </body></html>",
            site = escape_html(&self.site_name),
            token = escape_html(token),
            link = escape_html(link),
        )
    }
}

impl EmailComposer for SigninEmailComposer {
    fn compose(&self, token: &str, uid: &str, recipient: &str) -> DomainResult<EmailMessage> {
        let link = signin_url(&self.endpoint, &self.strategy, token, uid);

        Ok(EmailMessage::new(recipient, format!("{} sign-in", self.site_name))
            .with_body(BodyKind::Plain, self.text_body(token, &link))
            .with_body(BodyKind::Html, self.html_body(token, &link)))
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
