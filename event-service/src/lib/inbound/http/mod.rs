pub mod edge;
pub mod handlers;
pub mod middleware;
pub mod router;
