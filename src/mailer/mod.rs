//! Mail dispatcher: turns a submitted application into two notification emails.
//!
//! SMTP settings are checked once when the dispatcher is built. A dispatcher
//! with incomplete settings still starts; it fails every dispatch with
//! [`DispatchError::MissingConfiguration`] before composing or sending.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::SubmittedApplication;
use crate::config::SmtpConfig;

pub mod compose;
pub mod transport;

pub use compose::{EmailComposer, OutgoingEmail};
pub use transport::{MailTransport, RecordingTransport, SmtpMailTransport, TransportError};

/// Failures reported back to the submitter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Missing required email configuration")]
    MissingConfiguration,
    #[error("Failed to connect to email server")]
    ConnectionFailed,
    #[error("Failed to prepare notification email")]
    Compose,
    #[error("Failed to send notification email: {0}")]
    SendFailed(String),
}

/// Required SMTP settings that are missing or blank
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required email configuration: {}", .missing.join(", "))]
pub struct SmtpConfigError {
    pub missing: Vec<&'static str>,
}

/// SMTP settings with every required value present
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Implicit TLS instead of STARTTLS
    pub secure: bool,
    pub username: String,
    pub password: String,
    pub from: String,
    pub admin_email: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

impl SmtpSettings {
    /// Validate the configured values, listing every missing setting
    pub fn from_config(config: &SmtpConfig) -> Result<Self, SmtpConfigError> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str, value: &Option<String>| -> String {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let host = require("smtp.host", &config.host);
        let username = require("smtp.username", &config.username);
        let password = require("smtp.password", &config.password);
        let from = require("smtp.from", &config.from);
        let admin_email = require("smtp.admin_email", &config.admin_email);

        if !missing.is_empty() {
            return Err(SmtpConfigError { missing });
        }
        Ok(Self {
            host,
            port: config.port,
            secure: config.secure,
            username,
            password,
            from,
            admin_email,
        })
    }
}

enum DispatcherState {
    Ready {
        settings: SmtpSettings,
        transport: Arc<dyn MailTransport>,
    },
    Unconfigured(SmtpConfigError),
}

/// Sends the applicant acknowledgement and the admin notification
pub struct MailDispatcher {
    state: DispatcherState,
    composer: EmailComposer,
}

impl MailDispatcher {
    /// Dispatcher delivering over SMTP with the configured relay.
    ///
    /// Needs a running tokio runtime, like [`SmtpMailTransport::new`].
    pub fn from_config(config: &SmtpConfig) -> Result<Self> {
        let state = match SmtpSettings::from_config(config) {
            Ok(settings) => {
                let transport = SmtpMailTransport::new(&settings)?;
                DispatcherState::Ready {
                    settings,
                    transport: Arc::new(transport),
                }
            }
            Err(e) => DispatcherState::Unconfigured(e),
        };
        Self::with_state(state)
    }

    /// Dispatcher delivering through a caller-supplied transport
    pub fn with_transport(config: &SmtpConfig, transport: Arc<dyn MailTransport>) -> Result<Self> {
        let state = match SmtpSettings::from_config(config) {
            Ok(settings) => DispatcherState::Ready {
                settings,
                transport,
            },
            Err(e) => DispatcherState::Unconfigured(e),
        };
        Self::with_state(state)
    }

    fn with_state(state: DispatcherState) -> Result<Self> {
        match &state {
            DispatcherState::Ready { settings, .. } => tracing::info!(
                host = %settings.host,
                port = settings.port,
                secure = settings.secure,
                "Mail dispatcher configured"
            ),
            DispatcherState::Unconfigured(e) => tracing::warn!(
                error = %e,
                "Mail dispatcher is not configured; submissions will fail"
            ),
        }
        Ok(Self {
            state,
            composer: EmailComposer::new()?,
        })
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.state, DispatcherState::Ready { .. })
    }

    pub fn configuration_error(&self) -> Option<&SmtpConfigError> {
        match &self.state {
            DispatcherState::Unconfigured(e) => Some(e),
            DispatcherState::Ready { .. } => None,
        }
    }

    /// Verify the relay, then send the applicant email followed by the
    /// admin email. Stops at the first failure.
    pub async fn dispatch(&self, application: &SubmittedApplication) -> Result<(), DispatchError> {
        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!("dispatch", %submission_id);
        self.dispatch_inner(application).instrument(span).await
    }

    async fn dispatch_inner(&self, application: &SubmittedApplication) -> Result<(), DispatchError> {
        let (settings, transport) = match &self.state {
            DispatcherState::Ready {
                settings,
                transport,
            } => (settings, transport),
            DispatcherState::Unconfigured(e) => {
                tracing::error!(error = %e, "Rejecting submission");
                return Err(DispatchError::MissingConfiguration);
            }
        };

        if let Err(e) = transport.verify().await {
            tracing::error!(error = %e, "SMTP verification failed");
            return Err(DispatchError::ConnectionFailed);
        }

        let composed = self
            .composer
            .applicant_email(application, &settings.from)
            .and_then(|applicant| {
                let admin =
                    self.composer
                        .admin_email(application, &settings.from, &settings.admin_email)?;
                Ok((applicant, admin))
            });
        let (applicant, admin) = composed.map_err(|e| {
            tracing::error!(error = %e, "Could not compose notification emails");
            DispatchError::Compose
        })?;

        for (role, email) in [("applicant", &applicant), ("admin", &admin)] {
            transport.send(email).await.map_err(|e| {
                tracing::error!(recipient = role, error = %e, "Sending email failed");
                DispatchError::SendFailed(e.to_string())
            })?;
            tracing::info!(recipient = role, "Email sent");
        }
        Ok(())
    }
}
