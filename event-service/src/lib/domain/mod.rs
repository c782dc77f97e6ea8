pub mod audit;
pub mod session;
pub mod ticket;
pub mod user;
