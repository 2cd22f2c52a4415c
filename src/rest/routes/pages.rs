//! Static pages.

use axum::response::Html;

use crate::rest::error::ApiError;

const SUCCESS_PAGE: &str = include_str!("../pages/success.html");

/// Confirmation page shown after a successful browser submission
pub async fn success() -> Html<&'static str> {
    Html(SUCCESS_PAGE)
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
