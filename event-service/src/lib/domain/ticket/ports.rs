use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::audit::auditor::Auditor;
use crate::domain::ticket::errors::TicketError;
use crate::domain::ticket::models::CreateTicketCommand;
use crate::domain::ticket::models::Ticket;
use crate::domain::ticket::models::TicketStatus;

/// Port for ticket domain service operations.
#[async_trait]
pub trait TicketServicePort: Send + Sync + 'static {
    /// Create a new ticket from the public contact form.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_ticket(&self, command: CreateTicketCommand) -> Result<Ticket, TicketError>;

    /// Retrieve a ticket by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Ticket does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_ticket(&self, id: Uuid) -> Result<Ticket, TicketError>;

    /// Retrieve tickets, optionally filtered by status.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tickets(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, TicketError>;

    /// Transition a ticket's status, recording the change in the audit log.
    ///
    /// # Errors
    /// * `NotFound` - Ticket does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_status(
        &self,
        id: Uuid,
        status: TicketStatus,
        auditor: &Auditor,
    ) -> Result<Ticket, TicketError>;
}

/// Persistence operations for tickets.
#[async_trait]
pub trait TicketRepository: Send + Sync + 'static {
    /// Persist a new ticket to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError>;

    /// Retrieve a ticket by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, TicketError>;

    /// Retrieve tickets, optionally filtered by status, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, TicketError>;

    /// Update an existing ticket in storage.
    ///
    /// # Errors
    /// * `NotFound` - Ticket does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, ticket: Ticket) -> Result<Ticket, TicketError>;
}
