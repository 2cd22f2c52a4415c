//! OpenAPI specification builder using utoipa.

use utoipa::OpenApi;

use crate::application::{ApplicationDraft, SubmittedApplication};
use crate::rest::dto::{HealthResponse, SubmitResponse};
use crate::rest::error::ErrorResponse;

/// OpenAPI documentation for the submission endpoint
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job Ready Program API",
        description = "Receives applications for Heubert's Job Ready Program and sends the notification emails.",
        license(name = "MIT")
    ),
    paths(
        crate::rest::routes::health::health,
        crate::rest::routes::applications::submit,
    ),
    components(
        schemas(
            ApplicationDraft,
            SubmittedApplication,
            SubmitResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Applications", description = "Application submission"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI specification as a JSON string
    pub fn json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }

    /// Generate the OpenAPI specification as a YAML string
    pub fn yaml() -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&Self::openapi())
    }
}
