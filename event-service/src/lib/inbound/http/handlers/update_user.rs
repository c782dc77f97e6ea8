use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::audit::auditor::Auditor;
use crate::domain::user::models::Profile;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserStatus;
use crate::inbound::http::middleware::AuthContext;
use crate::inbound::http::router::AppState;

/// Staff mutation of a user. Role and status changes end up in the audit
/// log attributed to the acting user from the gate's context.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(email): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = UpdateUserCommand {
        role: body.role,
        status: body.status,
        info: body.info,
    };
    let auditor = Auditor::new(context.user);

    state
        .users
        .update_user(&email, command, &auditor)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateUserRequest {
    role: Option<Role>,
    status: Option<UserStatus>,
    info: Option<Profile>,
}
