use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::login::SessionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::extract_token;
use crate::inbound::http::router::AppState;

/// Optional-auth endpoint: resolves the caller's own session without a
/// gate. An absent, stale, or invalid token yields `null` data rather
/// than an error.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<Option<SessionResponseData>>, ApiError> {
    let Some(token) = extract_token(&headers) else {
        return Ok(ApiSuccess::new(StatusCode::OK, None));
    };

    let data = state
        .auth
        .me(&token)
        .await
        .map_err(ApiError::from)?
        .map(|(ref user, token)| SessionResponseData {
            user: user.into(),
            token,
        });

    Ok(ApiSuccess::new(StatusCode::OK, data))
}
