use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenCodec;
use event_service::domain::audit::errors::AuditError;
use event_service::domain::audit::models::AuditRecord;
use event_service::domain::audit::ports::AuditLogRepository;
use event_service::domain::session::errors::AuthError;
use event_service::domain::session::models::SessionRecord;
use event_service::domain::session::ports::SessionRepository;
use event_service::domain::session::service::SessionService;
use event_service::domain::ticket::errors::TicketError;
use event_service::domain::ticket::models::Ticket;
use event_service::domain::ticket::models::TicketStatus;
use event_service::domain::ticket::ports::TicketRepository;
use event_service::domain::ticket::service::TicketService;
use event_service::domain::user::errors::UserError;
use event_service::domain::user::models::Role;
use event_service::domain::user::models::User;
use event_service::domain::user::models::UserFilter;
use event_service::domain::user::ports::UserRepository;
use event_service::domain::user::service::UserService;
use event_service::inbound::http::router::create_router;
use event_service::inbound::http::router::AppState;
use tokio::sync::Mutex;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-claim-signing-32b";

/// In-memory stand-ins for the Postgres repositories. The server under
/// test runs against these, so the suite needs no database.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().await;
        let email = user.email.as_str().to_string();
        if users.contains_key(&email) {
            return Err(UserError::EmailAlreadyExists(email));
        }
        users.insert(email, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().await.get(email).cloned())
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, UserError> {
        let users = self.users.lock().await;
        let mut matched: Vec<User> = users
            .values()
            .filter(|user| filter.role.is_none_or(|role| user.role == role))
            .filter(|user| filter.status.is_none_or(|status| user.status == status))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(matched)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().await;
        let email = user.email.as_str().to_string();
        if !users.contains_key(&email) {
            return Err(UserError::NotFound(email));
        }
        users.insert(email, user.clone());
        Ok(user)
    }
}

impl InMemoryUserRepository {
    /// Directly set a user's role, bypassing the service and its audit
    /// trail. Test setup only.
    pub async fn promote(&self, email: &str, role: Role) {
        let mut users = self.users.lock().await;
        if let Some(user) = users.get_mut(email) {
            user.role = role;
        }
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, record: SessionRecord) -> Result<(), AuthError> {
        self.sessions
            .lock()
            .await
            .insert(record.key.clone(), record);
        Ok(())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<SessionRecord>, AuthError> {
        Ok(self.sessions.lock().await.get(key).cloned())
    }

    async fn delete_by_key(&self, key: &str) -> Result<(), AuthError> {
        self.sessions.lock().await.remove(key);
        Ok(())
    }
}

impl InMemorySessionRepository {
    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: Mutex<HashMap<Uuid, Ticket>>,
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        self.tickets.lock().await.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, TicketError> {
        Ok(self.tickets.lock().await.get(&id).cloned())
    }

    async fn list(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, TicketError> {
        let tickets = self.tickets.lock().await;
        let mut matched: Vec<Ticket> = tickets
            .values()
            .filter(|ticket| status.is_none_or(|status| ticket.status == status))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(matched)
    }

    async fn update(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        let mut tickets = self.tickets.lock().await;
        if !tickets.contains_key(&ticket.id) {
            return Err(TicketError::NotFound(ticket.id.to_string()));
        }
        tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }
}

#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    records: Mutex<Vec<AuditRecord>>,
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, record: AuditRecord) -> Result<(), AuditError> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self.records.lock().await;
        Ok(records.iter().rev().take(limit as usize).cloned().collect())
    }
}

impl InMemoryAuditLogRepository {
    pub async fn entries(&self) -> Vec<AuditRecord> {
        self.records.lock().await.clone()
    }
}

/// Test application that spawns a real server on a random port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub audit_log: Arc<InMemoryAuditLogRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let tickets = Arc::new(InMemoryTicketRepository::default());
        let audit_log = Arc::new(InMemoryAuditLogRepository::default());

        let auth_service = Arc::new(SessionService::new(
            Arc::clone(&users),
            Arc::clone(&sessions),
            TEST_SECRET,
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&users), Arc::clone(&audit_log)));
        let ticket_service = Arc::new(TicketService::new(tickets, Arc::clone(&audit_log)));

        let state = AppState {
            auth: auth_service,
            users: user_service,
            tickets: ticket_service,
            audit_log: Arc::clone(&audit_log) as Arc<dyn AuditLogRepository>,
            codec: Arc::new(TokenCodec::new(TEST_SECRET)),
        };

        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            users,
            sessions,
            audit_log,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// GET with the raw token in the Authorization header (no Bearer
    /// prefix; tokens are sent verbatim).
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(reqwest::header::AUTHORIZATION, token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path)
            .header(reqwest::header::AUTHORIZATION, token)
    }

    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.patch(path)
            .header(reqwest::header::AUTHORIZATION, token)
    }

    /// Register a staff-kind account and return its token. The account
    /// still starts at the `pending` role; use `promote` to raise it.
    pub async fn register_staff_account(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "kind": "staff",
                "email": email,
                "password": password,
                "confirm_password": password,
                "first_name": "Test",
                "last_name": "Account"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    pub async fn promote(&self, email: &str, role: Role) {
        self.users.promote(email, role).await;
    }
}
