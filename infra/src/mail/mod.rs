//! Mail module - SMTP delivery of sign-in emails
//!
//! - `EmailMessage` - subject, recipient and ordered alternative bodies
//! - `EmailComposer` / `SigninEmailComposer` - render the message for a token
//! - `Mailer` - submission seam, implemented for lettre's async SMTP transport
//! - `SmtpTransport` - the core `Transport` built from a composer and a mailer

mod composer;
mod message;
mod smtp;

#[cfg(test)]
mod tests;

pub use composer::{EmailComposer, SigninEmailComposer};
pub use message::{BodyKind, EmailBody, EmailMessage};
pub use smtp::{Mailer, SmtpTransport};
