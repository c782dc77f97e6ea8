use thiserror::Error;

/// Error for audit log persistence operations
#[derive(Debug, Clone, Error)]
pub enum AuditError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
