use chrono::Utc;
use uuid::Uuid;

use crate::domain::audit::models::AuditAction;
use crate::domain::audit::models::AuditRecord;

/// Per-request audit context bound to the acting user.
///
/// Constructed from the authorization context and passed explicitly to
/// mutation handlers. The auditor only computes records; whether and where
/// a record is persisted is the caller's decision.
#[derive(Debug, Clone)]
pub struct Auditor {
    actor: String,
}

impl Auditor {
    /// Bind an auditor to the acting user's identity.
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
        }
    }

    /// The acting user this auditor is bound to.
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Compute a log-ready record for a tracked mutation.
    pub fn record(&self, action: AuditAction) -> AuditRecord {
        let now = Utc::now();
        AuditRecord {
            id: Uuid::new_v4(),
            user: self.actor.clone(),
            title: action.title().to_string(),
            kind: action.kind().to_string(),
            data: action.data(),
            created: now,
            updated: now,
        }
    }
}
