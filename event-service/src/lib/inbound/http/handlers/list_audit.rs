use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::audit::models::AuditRecord;
use crate::inbound::http::router::AppState;

const DEFAULT_LIMIT: i64 = 100;

pub async fn list_audit(
    State(state): State<AppState>,
    Query(params): Query<ListAuditParams>,
) -> Result<ApiSuccess<Vec<AuditRecordData>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    state
        .audit_log
        .list_recent(limit)
        .await
        .map_err(ApiError::from)
        .map(|records| {
            ApiSuccess::new(
                StatusCode::OK,
                records.iter().map(AuditRecordData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ListAuditParams {
    limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecordData {
    pub id: Uuid,
    pub user: String,
    pub title: String,
    pub kind: String,
    pub data: serde_json::Value,
    pub created: DateTime<Utc>,
}

impl From<&AuditRecord> for AuditRecordData {
    fn from(record: &AuditRecord) -> Self {
        Self {
            id: record.id,
            user: record.user.clone(),
            title: record.title.clone(),
            kind: record.kind.clone(),
            data: record.data.clone(),
            created: record.created,
        }
    }
}
