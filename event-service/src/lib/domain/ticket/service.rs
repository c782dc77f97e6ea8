use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::audit::auditor::Auditor;
use crate::domain::audit::models::AuditAction;
use crate::domain::audit::ports::AuditLogRepository;
use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::CreateTicketCommand;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketStatus;
use crate::domain::ticket::ports::TicketRepository;
use crate::domain::ticket::ports::TicketServicePort;

/// Domain service implementation for ticket operations.
///
/// Status transitions write audit records through the audit log port.
pub struct TicketService<TR, AR>
where
    TR: TicketRepository,
    AR: AuditLogRepository,
{
    repository: Arc<TR>,
    audit_log: Arc<AR>,
}

impl<TR, AR> TicketService<TR, AR>
where
    TR: TicketRepository,
    AR: AuditLogRepository,
{
    /// Create a new ticket service with injected dependencies.
    pub fn new(repository: Arc<TR>, audit_log: Arc<AR>) -> Self {
        Self {
            repository,
            audit_log,
        }
    }
}

#[async_trait]
impl<TR, AR> TicketServicePort for TicketService<TR, AR>
where
    TR: TicketRepository,
    AR: AuditLogRepository,
{
    async fn create_ticket(&self, command: CreateTicketCommand) -> Result<Ticket, TicketError> {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            name: command.name,
            email: command.email,
            subject: command.subject,
            message: command.message,
            status: TicketStatus::Open,
            created: now,
            updated: now,
        };

        self.repository.insert(ticket).await
    }

    async fn get_ticket(&self, id: Uuid) -> Result<Ticket, TicketError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TicketError::NotFound(id.to_string()))
    }

    async fn list_tickets(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, TicketError> {
        self.repository.list(status).await
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: TicketStatus,
        auditor: &Auditor,
    ) -> Result<Ticket, TicketError> {
        let mut ticket = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TicketError::NotFound(id.to_string()))?;

        let record = auditor.record(AuditAction::TicketStatus {
            from: ticket.status,
            to: status,
        });

        ticket.status = status;
        ticket.updated = Utc::now();
        let updated = self.repository.update(ticket).await?;

        self.audit_log
            .append(record)
            .await
            .map_err(|e| TicketError::DatabaseError(e.to_string()))?;

        Ok(updated)
    }
}
