//! Provider-neutral email representation

use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::InfrastructureError;

/// Content type of one alternative body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Plain,
    Html,
}

/// One alternative rendering of the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailBody {
    pub kind: BodyKind,
    pub content: String,
}

impl EmailBody {
    fn into_part(self) -> SinglePart {
        match self.kind {
            BodyKind::Plain => SinglePart::plain(self.content),
            BodyKind::Html => SinglePart::html(self.content),
        }
    }
}

/// An email with alternative bodies, least- to most-preferred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    to: String,
    subject: String,
    bodies: Vec<EmailBody>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            bodies: Vec::new(),
        }
    }

    /// Append a body; later bodies are preferred by mail clients
    pub fn with_body(mut self, kind: BodyKind, content: impl Into<String>) -> Self {
        self.bodies.push(EmailBody {
            kind,
            content: content.into(),
        });
        self
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn bodies(&self) -> &[EmailBody] {
        &self.bodies
    }

    /// Body of the given kind, if present
    pub fn body(&self, kind: BodyKind) -> Option<&str> {
        self.bodies
            .iter()
            .find(|body| body.kind == kind)
            .map(|body| body.content.as_str())
    }

    /// Build a lettre message sent from `from`
    ///
    /// A single body becomes a single part; several become a
    /// `multipart/alternative` in the order they were added.
    pub fn into_message(self, from: &Mailbox) -> Result<Message, InfrastructureError> {
        let to: Mailbox = self
            .to
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("invalid recipient '{}': {}", self.to, e)))?;

        let builder = Message::builder()
            .from(from.clone())
            .to(to)
            .subject(self.subject);

        let mut parts = self.bodies.into_iter().map(EmailBody::into_part);
        let first = parts
            .next()
            .ok_or_else(|| InfrastructureError::Mail("email has no body".to_string()))?;

        let message = match parts.next() {
            None => builder.singlepart(first),
            Some(second) => {
                let alternative = MultiPart::alternative().singlepart(first).singlepart(second);
                builder.multipart(parts.fold(alternative, |multipart, part| multipart.singlepart(part)))
            }
        };

        message.map_err(|e| InfrastructureError::Mail(format!("failed to build email: {}", e)))
    }
}
