use thiserror::Error;

/// Error for TicketStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketStatusError {
    #[error("Unknown ticket status: {0}")]
    Unknown(String),
}

/// Top-level error for all ticket-related operations
#[derive(Debug, Clone, Error)]
pub enum TicketError {
    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] TicketStatusError),

    #[error("Unable to find ticket {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
