pub mod audit;
pub mod session;
pub mod ticket;
pub mod user;

pub use audit::PostgresAuditLogRepository;
pub use session::PostgresSessionRepository;
pub use ticket::PostgresTicketRepository;
pub use user::PostgresUserRepository;
