//! SMTP transport for sign-in tokens

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use pwl_core::domain::value_objects::RequestContext;
use pwl_core::errors::DomainResult;
use pwl_core::services::transport::Transport;
use pwl_shared::config::MailConfig;
use pwl_shared::masking::mask_recipient;

use super::composer::EmailComposer;
use crate::InfrastructureError;

/// Port on which SMTP servers expect implicit TLS
const IMPLICIT_TLS_PORT: u16 = 465;

/// Submits a finished message to a mail server
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn submit(&self, message: Message) -> Result<(), InfrastructureError>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn submit(&self, message: Message) -> Result<(), InfrastructureError> {
        AsyncTransport::send(self, message)
            .await
            .map(|_| ())
            .map_err(|e| InfrastructureError::Mail(e.to_string()))
    }
}

/// Delivers tokens by email
///
/// Every `send` submits exactly one message; a composition or submission
/// failure is returned as a delivery error and nothing is sent.
pub struct SmtpTransport<M: Mailer = AsyncSmtpTransport<Tokio1Executor>> {
    mailer: M,
    from: Mailbox,
    composer: Arc<dyn EmailComposer>,
}

impl SmtpTransport {
    /// Build an authenticated SMTP transport from configuration
    ///
    /// Port 465 uses implicit TLS, any other port STARTTLS. The TLS name is
    /// the auth host when configured, otherwise the server host.
    pub fn from_config(
        config: &MailConfig,
        composer: Arc<dyn EmailComposer>,
    ) -> Result<Self, InfrastructureError> {
        let from = parse_mailbox(&config.from)?;

        let tls_parameters = TlsParameters::new(config.relay_host().to_string())
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP TLS settings: {}", e)))?;
        let tls = if config.port == IMPLICIT_TLS_PORT {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Required(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls);
        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            event = "smtp_transport_configured",
            "Configured SMTP transport"
        );

        Ok(Self::new(builder.build(), from, composer))
    }
}

impl<M: Mailer> SmtpTransport<M> {
    pub fn new(mailer: M, from: Mailbox, composer: Arc<dyn EmailComposer>) -> Self {
        Self {
            mailer,
            from,
            composer,
        }
    }

    pub fn from_mailbox(&self) -> &Mailbox {
        &self.from
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }
}

#[async_trait]
impl<M: Mailer> Transport for SmtpTransport<M> {
    async fn send(
        &self,
        _ctx: &RequestContext,
        token: &str,
        uid: &str,
        recipient: &str,
    ) -> DomainResult<()> {
        let message = self
            .composer
            .compose(token, uid, recipient)?
            .into_message(&self.from)?;

        self.mailer.submit(message).await.map_err(|e| {
            tracing::error!(
                recipient = %mask_recipient(recipient),
                error = %e,
                event = "email_submit_failed",
                "Failed to submit sign-in email"
            );
            e
        })?;

        tracing::info!(
            recipient = %mask_recipient(recipient),
            event = "email_sent",
            "Sign-in email submitted"
        );
        Ok(())
    }
}

/// Parse a mailbox such as `Sign-in <signin@example.com>`
pub(crate) fn parse_mailbox(value: &str) -> Result<Mailbox, InfrastructureError> {
    value
        .parse()
        .map_err(|e| InfrastructureError::Config(format!("Invalid mailbox '{}': {}", value, e)))
}
