pub mod auditor;
pub mod errors;
pub mod models;
pub mod ports;
