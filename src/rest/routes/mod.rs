//! Route handlers for the submission endpoint.

pub mod applications;
pub mod health;
pub mod pages;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::SmtpConfig;
    use crate::mailer::{MailDispatcher, RecordingTransport};
    use crate::rest::ApiState;

    pub fn smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: Some("smtp.example.com".to_string()),
            username: Some("mailer".to_string()),
            password: Some("secret".to_string()),
            from: Some("noreply@heubert.com".to_string()),
            admin_email: Some("admin@heubert.com".to_string()),
            ..SmtpConfig::default()
        }
    }

    pub fn state_with(smtp: SmtpConfig) -> (ApiState, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = MailDispatcher::with_transport(&smtp, transport.clone()).unwrap();
        (ApiState::new(dispatcher), transport)
    }
}
