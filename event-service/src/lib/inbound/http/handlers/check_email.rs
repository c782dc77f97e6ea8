use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Pre-registration existence check used by the signup form.
pub async fn check_email(
    State(state): State<AppState>,
    Query(params): Query<CheckEmailParams>,
) -> Result<ApiSuccess<bool>, ApiError> {
    state
        .auth
        .email_taken(&params.email)
        .await
        .map_err(ApiError::from)
        .map(|taken| ApiSuccess::new(StatusCode::OK, taken))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckEmailParams {
    email: String,
}
