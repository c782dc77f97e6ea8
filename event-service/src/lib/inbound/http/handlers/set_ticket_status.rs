use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use super::TicketData;
use crate::domain::audit::auditor::Auditor;
use crate::domain::ticket::models::TicketStatus;
use crate::inbound::http::middleware::AuthContext;
use crate::inbound::http::router::AppState;

pub async fn set_ticket_status(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetTicketStatusRequest>,
) -> Result<ApiSuccess<TicketData>, ApiError> {
    let auditor = Auditor::new(context.user);

    state
        .tickets
        .set_status(id, body.status, &auditor)
        .await
        .map_err(ApiError::from)
        .map(|ref ticket| ApiSuccess::new(StatusCode::OK, ticket.into()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetTicketStatusRequest {
    status: TicketStatus,
}
