use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ticket::models::TicketStatus;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserStatus;

/// The closed set of tracked mutations.
///
/// Every audit entry's `kind` tag corresponds to exactly one variant here;
/// there is no way to log an unregistered action.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditAction {
    /// A ticket's status transitioned.
    TicketStatus { from: TicketStatus, to: TicketStatus },
    /// A user's role tier changed.
    UserRole { from: Role, to: Role },
    /// A user's review status changed.
    UserStatus { from: UserStatus, to: UserStatus },
}

impl AuditAction {
    /// Tag identifying which action produced a log entry.
    pub fn kind(&self) -> &'static str {
        match self {
            AuditAction::TicketStatus { .. } => "status",
            AuditAction::UserRole { .. } => "role",
            AuditAction::UserStatus { .. } => "user-status",
        }
    }

    /// Human-readable title for the log entry.
    pub fn title(&self) -> &'static str {
        match self {
            AuditAction::TicketStatus { .. } => "Changed Status",
            AuditAction::UserRole { .. } => "Changed Role",
            AuditAction::UserStatus { .. } => "Changed User Status",
        }
    }

    /// Action-specific fields carried by the log entry.
    pub fn data(&self) -> serde_json::Value {
        match self {
            AuditAction::TicketStatus { from, to } => json!({ "from": from, "to": to }),
            AuditAction::UserRole { from, to } => json!({ "from": from, "to": to }),
            AuditAction::UserStatus { from, to } => json!({ "from": from, "to": to }),
        }
    }
}

/// A log-ready record of a tracked mutation.
///
/// Append-only: never mutated or deleted once persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub id: Uuid,
    /// Acting user, populated from the authorization context.
    pub user: String,
    pub title: String,
    pub kind: String,
    pub data: serde_json::Value,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}
