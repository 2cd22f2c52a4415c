//! Submission client: posts a frozen application to the submission endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::application::SubmittedApplication;
use crate::config::ClientConfig;

/// Why a submission did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The endpoint answered but refused the application
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The request never completed
    #[error("{0}")]
    Network(String),
}

impl SubmitError {
    /// HTTP status returned by the endpoint, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitError::Rejected { status, .. } => Some(*status),
            SubmitError::Network(_) => None,
        }
    }
}

/// Anything that can deliver a submitted application
#[async_trait]
pub trait SubmitApplication: Send + Sync {
    async fn submit(&self, application: &SubmittedApplication) -> Result<(), SubmitError>;
}

/// Response body shape shared by success and failure replies
#[derive(Debug, Default, Deserialize)]
struct SubmitResponseBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Map an HTTP reply to the submission outcome.
///
/// Failure replies carry `{ "error": ... }` when the server could describe
/// the problem; otherwise the status code is reported. A success reply only
/// fails when it explicitly says `"success": false`.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<(), SubmitError> {
    let parsed: SubmitResponseBody = serde_json::from_str(body).unwrap_or_default();

    if status.is_success() {
        if parsed.success == Some(false) {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message: parsed
                    .error
                    .unwrap_or_else(|| "Server did not accept the application".to_string()),
            });
        }
        return Ok(());
    }

    let message = parsed
        .error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| format!("Server returned {}", status.as_u16()));
    Err(SubmitError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Submits applications over HTTP with a single POST, no retries
pub struct HttpSubmissionClient {
    endpoint: String,
    client: Client,
}

impl HttpSubmissionClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitApplication for HttpSubmissionClient {
    async fn submit(&self, application: &SubmittedApplication) -> Result<(), SubmitError> {
        tracing::info!(endpoint = %self.endpoint, "Submitting application");

        let response = self
            .client
            .post(&self.endpoint)
            .json(application)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "Submission request failed");
                SubmitError::Network(describe_transport_error(&e))
            })?;

        let status = response.status();
        // An unreadable body is treated like an empty one
        let body = response.text().await.unwrap_or_default();
        let result = interpret_response(status, &body);

        match &result {
            Ok(()) => tracing::info!(status = %status, "Application accepted"),
            Err(e) => tracing::warn!(status = %status, error = %e, "Application rejected"),
        }
        result
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "The submission server did not respond in time".to_string()
    } else if err.is_connect() {
        "Could not connect to the submission server".to_string()
    } else {
        format!("Submission failed: {err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_acknowledgement() {
        assert_eq!(interpret_response(StatusCode::OK, r#"{"success":true}"#), Ok(()));
    }

    #[test]
    fn test_success_tolerates_missing_or_garbled_body() {
        assert_eq!(interpret_response(StatusCode::OK, ""), Ok(()));
        assert_eq!(interpret_response(StatusCode::OK, "<html>ok</html>"), Ok(()));
    }

    #[test]
    fn test_explicit_false_on_success_status_is_failure() {
        let err = interpret_response(StatusCode::OK, r#"{"success":false}"#).unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn test_error_body_message_is_surfaced() {
        let err = interpret_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Missing required email configuration"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing required email configuration");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_error_without_body_falls_back_to_status() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, "Bad Gateway").unwrap_err();
        assert_eq!(err.to_string(), "Server returned 502");

        let err = interpret_response(StatusCode::NOT_FOUND, r#"{"error":""}"#).unwrap_err();
        assert_eq!(err.to_string(), "Server returned 404");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = SubmitError::Network("Could not connect".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Could not connect");
    }
}
