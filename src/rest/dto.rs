//! Data Transfer Objects for the submission endpoint.
//!
//! The request body is [`crate::application::SubmittedApplication`] itself.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement of a dispatched application
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether SMTP settings are complete
    pub mail_configured: bool,
}
