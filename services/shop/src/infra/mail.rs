//! SMTP email transport.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};

use crate::config::ShopConfig;
use crate::domain::repository::Mailer;
use crate::error::IntegrationError;

/// Plain-text mail over an authenticated STARTTLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the relay transport. No connection is opened until the first send.
    pub fn new(config: &ShopConfig) -> anyhow::Result<Self> {
        let credentials =
            Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e: SmtpError| anyhow::anyhow!("smtp relay {}: {e}", config.smtp_host))?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();
        let from = config
            .mail_from
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("MAIL_FROM {:?}: {e}", config.mail_from))?;
        Ok(Self { transport, from })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), IntegrationError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| IntegrationError::Email(format!("invalid recipient {to:?}: {e}")))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_owned())
            .map_err(|e| IntegrationError::Email(format!("build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| IntegrationError::Email(e.to_string()))?;
        Ok(())
    }
}
