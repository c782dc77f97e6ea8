use std::sync::Arc;

use auth::TokenCodec;
use event_service::config::Config;
use event_service::domain::session::service::SessionService;
use event_service::domain::ticket::service::TicketService;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::inbound::http::router::AppState;
use event_service::outbound::repositories::PostgresAuditLogRepository;
use event_service::outbound::repositories::PostgresSessionRepository;
use event_service::outbound::repositories::PostgresTicketRepository;
use event_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "event-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let session_repository = Arc::new(PostgresSessionRepository::new(pg_pool.clone()));
    let ticket_repository = Arc::new(PostgresTicketRepository::new(pg_pool.clone()));
    let audit_log = Arc::new(PostgresAuditLogRepository::new(pg_pool));

    let secret = config.auth.secret.as_bytes();
    let auth_service = Arc::new(SessionService::new(
        Arc::clone(&user_repository),
        session_repository,
        secret,
    ));
    let user_service = Arc::new(UserService::new(user_repository, Arc::clone(&audit_log)));
    let ticket_service = Arc::new(TicketService::new(ticket_repository, Arc::clone(&audit_log)));

    let state = AppState {
        auth: auth_service,
        users: user_service,
        tickets: ticket_service,
        audit_log,
        codec: Arc::new(TokenCodec::new(secret)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
