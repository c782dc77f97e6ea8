use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TicketData;
use crate::domain::ticket::models::TicketStatus;
use crate::inbound::http::router::AppState;

pub async fn list_tickets(
    State(state): State<AppState>,
    Query(params): Query<ListTicketsParams>,
) -> Result<ApiSuccess<Vec<TicketData>>, ApiError> {
    state
        .tickets
        .list_tickets(params.status)
        .await
        .map_err(ApiError::from)
        .map(|tickets| {
            ApiSuccess::new(
                StatusCode::OK,
                tickets.iter().map(TicketData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ListTicketsParams {
    status: Option<TicketStatus>,
}
