//! Per-request context handed to strategies and the protocol.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use pwl_shared::config::Environment;
use tokio::time::Instant;

use crate::errors::{DomainError, DomainResult};

/// Ambient information about the request being served
///
/// Strategies consult it to decide whether they are usable (for example a
/// debug strategy outside production), and the protocol honours its
/// deadline. Dropping a protocol future cancels the operation.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    environment: Environment,
    deadline: Option<Instant>,
    attributes: HashMap<String, String>,
}

impl RequestContext {
    /// Create a context for the given environment
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Default::default()
        }
    }

    /// Set an absolute deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Attach a free-form attribute (client address, locale, ...)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Run `operation` under this context's deadline, if any
    pub async fn run<F, T>(&self, operation: &'static str, fut: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| DomainError::DeadlineExceeded { operation })?,
            None => fut.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_attributes_and_environment() {
        let ctx = RequestContext::new(Environment::Production).with_attribute("ip", "10.0.0.1");

        assert_eq!(ctx.environment(), Environment::Production);
        assert_eq!(ctx.attribute("ip"), Some("10.0.0.1"));
        assert_eq!(ctx.attribute("locale"), None);
        assert!(ctx.deadline().is_none());
    }

    #[tokio::test]
    async fn test_run_without_deadline_passes_through() {
        let ctx = RequestContext::default();
        let value = ctx.run("noop", async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_past_deadline_fails() {
        let ctx = RequestContext::default().with_timeout(Duration::from_millis(50));
        let result: DomainResult<()> = ctx
            .run("slow", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::DeadlineExceeded);
    }
}
