use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::SessionRecord;
use crate::domain::session::ports::SessionRepository;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn from_row(row: &PgRow) -> Result<SessionRecord, AuthError> {
    Ok(SessionRecord {
        key: row
            .try_get("key")
            .map_err(|e| AuthError::Database(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| AuthError::Database(e.to_string()))?,
        created: row
            .try_get("created")
            .map_err(|e| AuthError::Database(e.to_string()))?,
        updated: row
            .try_get("updated")
            .map_err(|e| AuthError::Database(e.to_string()))?,
    })
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, record: SessionRecord) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (key, email, created, updated)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&record.key)
        .bind(&record.email)
        .bind(record.created)
        .bind(record.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<SessionRecord>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT key, email, created, updated
            FROM sessions
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        row.as_ref().map(from_row).transpose()
    }

    async fn delete_by_key(&self, key: &str) -> Result<(), AuthError> {
        // A missing key deletes zero rows, which is fine
        sqlx::query("DELETE FROM sessions WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(())
    }
}
