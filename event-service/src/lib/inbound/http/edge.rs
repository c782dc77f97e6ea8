use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::session::models::RoleClaim;
use crate::domain::session::models::SESSION_KEY_LENGTH;
use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::extract_token;
use crate::inbound::http::router::AppState;

/// Page-routing gate for the staff portal.
///
/// This is the low-trust path: it verifies the token's signed role claim
/// but never touches the session store, so a stale claim from an older
/// token is accepted. Only redirect decisions may depend on it; data-plane
/// access always goes through the session-resolving gates in `middleware`.
pub async fn staff_gate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiSuccess<StaffGateData> {
    let role = extract_token(&headers).and_then(|token| claim_role(&state, &token));

    let allow = role.is_some_and(|role| role.satisfies(Role::Staff));

    ApiSuccess::new(StatusCode::OK, StaffGateData { allow, role })
}

/// Extract the verified role claim from a delivered token's suffix.
fn claim_role(state: &AppState, token: &str) -> Option<Role> {
    let suffix = token.get(SESSION_KEY_LENGTH..)?;

    match state.codec.verify::<RoleClaim>(suffix) {
        Ok(claim) => Some(claim.role),
        Err(e) => {
            // Unverified peek is for the log line only, never for the
            // allow decision
            let peeked = state
                .codec
                .decode_unverified::<RoleClaim>(suffix)
                .map(|claim| claim.role);
            tracing::debug!(error = %e, peeked_role = ?peeked, "Edge gate rejected token");
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StaffGateData {
    pub allow: bool,
    pub role: Option<Role>,
}
