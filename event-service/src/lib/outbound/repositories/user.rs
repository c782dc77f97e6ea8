use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Profile;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a `users` row to the domain aggregate. Role and status are stored
/// as text, the profile as JSONB.
fn from_row(row: &PgRow) -> Result<User, UserError> {
    let info: Option<serde_json::Value> = row
        .try_get("info")
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;
    let info: Option<Profile> = info
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| UserError::Unknown(format!("Malformed profile info: {}", e)))?;

    Ok(User {
        id: UserId(
            row.try_get("id")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        ),
        email: EmailAddress::new(
            row.try_get("email")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        )?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        role: Role::from_str(
            row.try_get::<String, _>("role")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?
                .as_str(),
        )?,
        status: UserStatus::from_str(
            row.try_get::<String, _>("status")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?
                .as_str(),
        )?,
        info,
        created: row
            .try_get("created")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        updated: row
            .try_get("updated")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
    })
}

fn info_json(user: &User) -> Result<Option<serde_json::Value>, UserError> {
    user.info
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| UserError::Unknown(format!("Unserializable profile info: {}", e)))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: User) -> Result<User, UserError> {
        let info = info_json(&user)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, status, info, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(info)
        .bind(user.created)
        .bind(user.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, status, info, created, updated
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(from_row).transpose()
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, status, info, created, updated
            FROM users
            WHERE ($1::text IS NULL OR role = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created DESC
            "#,
        )
        .bind(filter.role.map(|role| role.as_str()))
        .bind(filter.status.map(|status| status.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(from_row).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let info = info_json(&user)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, role = $3, status = $4, info = $5, updated = $6
            WHERE email = $1
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(info)
        .bind(user.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.email.as_str().to_string()));
        }

        Ok(user)
    }
}
