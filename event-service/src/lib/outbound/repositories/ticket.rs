use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketStatus;
use crate::domain::ticket::ports::TicketRepository;

pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn from_row(row: &PgRow) -> Result<Ticket, TicketError> {
    Ok(Ticket {
        id: row
            .try_get("id")
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?,
        subject: row
            .try_get("subject")
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?,
        message: row
            .try_get("message")
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?,
        status: TicketStatus::from_str(
            row.try_get::<String, _>("status")
                .map_err(|e| TicketError::DatabaseError(e.to_string()))?
                .as_str(),
        )?,
        created: row
            .try_get("created")
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?,
        updated: row
            .try_get("updated")
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?,
    })
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        sqlx::query(
            r#"
            INSERT INTO tickets (id, name, email, subject, message, status, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(ticket.id)
        .bind(&ticket.name)
        .bind(&ticket.email)
        .bind(&ticket.subject)
        .bind(&ticket.message)
        .bind(ticket.status.as_str())
        .bind(ticket.created)
        .bind(ticket.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| TicketError::DatabaseError(e.to_string()))?;

        Ok(ticket)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, TicketError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, subject, message, status, created, updated
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TicketError::DatabaseError(e.to_string()))?;

        row.as_ref().map(from_row).transpose()
    }

    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, TicketError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, subject, message, status, created, updated
            FROM tickets
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created DESC
            "#,
        )
        .bind(status.map(|status| status.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TicketError::DatabaseError(e.to_string()))?;

        rows.iter().map(from_row).collect()
    }

    async fn update(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET status = $2, updated = $3
            WHERE id = $1
            "#,
        )
        .bind(ticket.id)
        .bind(ticket.status.as_str())
        .bind(ticket.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| TicketError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TicketError::NotFound(ticket.id.to_string()));
        }

        Ok(ticket)
    }
}
