//! Mail transports: lettre SMTP for real delivery, an in-memory recorder for
//! tests and dry runs.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use super::compose::OutgoingEmail;
use super::SmtpSettings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not reach mail server: {0}")]
    Connection(String),
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("could not build message: {0}")]
    Message(String),
    #[error("mail server rejected message: {0}")]
    Rejected(String),
}

/// Delivers rendered emails
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Check that the server is reachable and accepts our credentials
    async fn verify(&self) -> Result<(), TransportError>;

    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError>;
}

/// SMTP delivery through lettre
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build a transport for the relay.
    ///
    /// `secure` selects implicit TLS (usually port 465); otherwise the
    /// connection is upgraded with STARTTLS.
    ///
    /// Must be called from within a tokio runtime: the connection pool
    /// spawns its maintenance task on construction.
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .map_err(|e| TransportError::Connection(e.to_string()))?;

        let mailer = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();
        Ok(Self { mailer })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| TransportError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

fn build_message(email: &OutgoingEmail) -> Result<Message, TransportError> {
    Message::builder()
        .from(parse_mailbox(&email.from)?)
        .to(parse_mailbox(&email.to)?)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| TransportError::Message(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn verify(&self) -> Result<(), TransportError> {
        match self.mailer.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(TransportError::Connection(
                "server did not accept the connection".to_string(),
            )),
            Err(e) => Err(TransportError::Connection(e.to_string())),
        }
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        let message = build_message(email)?;
        self.mailer
            .send(message)
            .await
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        Ok(())
    }
}

/// Keeps every email in memory instead of sending it
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_verify: bool,
    fail_send: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose server is unreachable
    pub fn unreachable() -> Self {
        Self {
            fail_verify: true,
            ..Self::default()
        }
    }

    /// A transport that connects but rejects every message
    pub fn rejecting() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    /// Emails accepted so far, in send order
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn verify(&self) -> Result<(), TransportError> {
        if self.fail_verify {
            return Err(TransportError::Connection("connection refused".to_string()));
        }
        Ok(())
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), TransportError> {
        if self.fail_send {
            return Err(TransportError::Rejected("550 mailbox unavailable".to_string()));
        }
        // Same validation as a real send, so bad addresses fail in dry runs too
        build_message(email)?;

        tracing::info!(to = %email.to, subject = %email.subject, "Recorded email (not sent)");
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.clone());
        Ok(())
    }
}
