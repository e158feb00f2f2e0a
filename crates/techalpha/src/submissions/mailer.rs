use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::SmtpConfig;

/// Plain-text message handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound notification hook (SMTP in production, recorded in tests).
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address '{address}': {reason}")]
    Address { address: String, reason: String },
    #[error("unable to build message: {0}")]
    Build(String),
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|err| MailError::Address {
            address: raw.to_string(),
            reason: err.to_string(),
        })
}

/// `"TechAlpha Hub" <EMAIL_USER>`
pub fn sender_mailbox(config: &SmtpConfig) -> Result<Mailbox, MailError> {
    let address = parse_address(&config.username)?;
    Ok(Mailbox::new(Some(config.sender_name.clone()), address))
}

/// SMTP relay over implicit TLS, authenticated with the configured account.
///
/// Generic over the lettre transport so message assembly can run against a stub.
pub struct SmtpMailer<T = AsyncSmtpTransport<Tokio1Executor>> {
    transport: T,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = sender_mailbox(config)?;
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|err| MailError::Transport(err.to_string()))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self::with_transport(transport, from))
    }
}

impl<T> SmtpMailer<T> {
    pub fn with_transport(transport: T, from: Mailbox) -> Self {
        Self { transport, from }
    }

    fn compose(&self, email: OutboundEmail) -> Result<Message, MailError> {
        let recipient = Mailbox::new(None, parse_address(&email.to)?);
        Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|err| MailError::Build(err.to_string()))
    }
}

impl<T> std::fmt::Debug for SmtpMailer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> Mailer for SmtpMailer<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: std::fmt::Display,
{
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let to = email.to.clone();
        let message = self.compose(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;
        debug!(%to, "mail accepted by relay");
        Ok(())
    }
}
