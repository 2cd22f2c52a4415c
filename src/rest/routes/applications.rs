//! Application submission endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::application::SubmittedApplication;
use crate::rest::dto::SubmitResponse;
use crate::rest::error::{ApiError, ErrorResponse};
use crate::rest::state::ApiState;

/// Send the notification emails for a submitted application
#[utoipa::path(
    post,
    path = "/api/submit-application",
    tag = "Applications",
    request_body = SubmittedApplication,
    responses(
        (status = 200, description = "Both emails were sent", body = SubmitResponse),
        (status = 400, description = "Body is not a valid application", body = ErrorResponse),
        (status = 405, description = "Only POST is supported", body = ErrorResponse),
        (status = 500, description = "Configuration or SMTP failure", body = ErrorResponse)
    )
)]
pub async fn submit(
    State(state): State<ApiState>,
    payload: Result<Json<SubmittedApplication>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(application) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected unreadable application");
        ApiError::from(rejection)
    })?;

    if let Some(step) = application.draft().first_incomplete_step() {
        tracing::warn!(
            step = step.title(),
            fields = ?step.fields(application.draft()),
            "Received an application that does not pass every step check"
        );
    }

    state.dispatcher.dispatch(&application).await?;
    Ok(Json(SubmitResponse { success: true }))
}

/// Any method other than POST on the submission route
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
