use async_trait::async_trait;

use crate::domain::audit::errors::AuditError;
use crate::domain::audit::models::AuditRecord;

/// Append-only persistence for audit records.
#[async_trait]
pub trait AuditLogRepository: Send + Sync + 'static {
    /// Append a record to the log.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn append(&self, record: AuditRecord) -> Result<(), AuditError>;

    /// Retrieve the most recent records, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, AuditError>;
}
