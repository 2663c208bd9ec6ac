//! Debug transport that writes the sign-in message to the log

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use pwl_shared::masking::mask_recipient;

use crate::domain::value_objects::RequestContext;
use crate::errors::DomainResult;

use super::traits::Transport;

/// Builds the message text from `(token, uid)`
pub type MessageFn = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Prints the sign-in message instead of delivering it
///
/// Intended for development; pair it with an environment-gated strategy so
/// it never runs in production.
pub struct LogTransport {
    message: MessageFn,
    last_message: Mutex<Option<String>>,
}

impl LogTransport {
    pub fn new<F>(message: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        Self {
            message: Arc::new(message),
            last_message: Mutex::new(None),
        }
    }

    /// Most recent message emitted
    pub fn last_message(&self) -> Option<String> {
        self.last_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for LogTransport {
    fn default() -> Self {
        Self::new(|token, uid| format!("token {} for uid {}", token, uid))
    }
}

impl fmt::Debug for LogTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for LogTransport {
    async fn send(
        &self,
        _ctx: &RequestContext,
        token: &str,
        uid: &str,
        recipient: &str,
    ) -> DomainResult<()> {
        let message = (self.message)(token, uid);

        tracing::info!(
            recipient = %mask_recipient(recipient),
            event = "debug_token_message",
            "{}",
            message
        );

        *self
            .last_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message);

        Ok(())
    }
}
