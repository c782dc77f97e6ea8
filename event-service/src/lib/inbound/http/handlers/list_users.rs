use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserStatus;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let filter = UserFilter {
        role: params.role,
        status: params.status,
    };

    state
        .users
        .list_users(filter)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect())
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ListUsersParams {
    role: Option<Role>,
    status: Option<UserStatus>,
}
