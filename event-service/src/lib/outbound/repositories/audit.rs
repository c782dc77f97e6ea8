use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::audit::errors::AuditError;
use crate::domain::audit::models::AuditRecord;
use crate::domain::audit::ports::AuditLogRepository;

pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn from_row(row: &PgRow) -> Result<AuditRecord, AuditError> {
    Ok(AuditRecord {
        id: row
            .try_get("id")
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?,
        user: row
            .try_get("user_email")
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?,
        title: row
            .try_get("title")
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?,
        kind: row
            .try_get("kind")
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?,
        data: row
            .try_get("data")
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?,
        created: row
            .try_get("created")
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?,
        updated: row
            .try_get("updated")
            .map_err(|e| AuditError::DatabaseError(e.to_string()))?,
    })
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn append(&self, record: AuditRecord) -> Result<(), AuditError> {
        sqlx::query(
            r#"
            INSERT INTO audit_log (id, user_email, title, kind, data, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(&record.user)
        .bind(&record.title)
        .bind(&record.kind)
        .bind(&record.data)
        .bind(record.created)
        .bind(record.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, AuditError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_email, title, kind, data, created, updated
            FROM audit_log
            ORDER BY created DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuditError::DatabaseError(e.to_string()))?;

        rows.iter().map(from_row).collect()
    }
}
