use std::sync::Arc;
use std::time::Duration;

use auth::TokenCodec;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::edge::staff_gate;
use super::handlers::check_email::check_email;
use super::handlers::create_ticket::create_ticket;
use super::handlers::get_user::get_user;
use super::handlers::list_audit::list_audit;
use super::handlers::list_tickets::list_tickets;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::set_ticket_status::set_ticket_status;
use super::handlers::update_user::update_user;
use super::middleware::require_admin;
use super::middleware::require_authenticated;
use super::middleware::require_staff;
use crate::domain::audit::ports::AuditLogRepository;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::ticket::ports::TicketServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthServicePort>,
    pub users: Arc<dyn UserServicePort>,
    pub tickets: Arc<dyn TicketServicePort>,
    pub audit_log: Arc<dyn AuditLogRepository>,
    /// Role-claim codec for the edge gate's store-free checks.
    pub codec: Arc<TokenCodec>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/auth/email", get(check_email))
        .route("/api/tickets", post(create_ticket))
        .route("/gate/staff", get(staff_gate));

    let authenticated_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    let staff_routes = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/:email", get(get_user))
        .route("/api/users/:email", patch(update_user))
        .route("/api/tickets", get(list_tickets))
        .route("/api/tickets/:id/status", patch(set_ticket_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff));

    let admin_routes = Router::new()
        .route("/api/audit", get(list_audit))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
