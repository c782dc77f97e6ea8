use async_trait::async_trait;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionRecord;
use crate::domain::user::models::User;

/// Port for the authentication flows and session store.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and create a session.
    ///
    /// # Returns
    /// The user and a delivered token (session key + signed role claim)
    ///
    /// # Errors
    /// * `NotFound` - No account with this email, or no password set
    /// * `IncorrectCredentials` - Password mismatch; no session is created
    /// * `SessionInvariant` - Session round-trip lookup failed
    /// * `Database` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError>;

    /// Invalidate a session. Idempotent: a missing key is not an error.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn logout(&self, session: &Session) -> Result<(), AuthError>;

    /// Resolve the caller's own user from a presented token.
    ///
    /// # Returns
    /// The user and a freshly minted token, or None for an invalid,
    /// expired, or absent session (the expected anonymous case)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn me(&self, token: &str) -> Result<Option<(User, String)>, AuthError>;

    /// Register a new account and log it in.
    ///
    /// # Returns
    /// The created user and a delivered token
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `SessionInvariant` - Session round-trip lookup failed
    /// * `Database` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<(User, String), AuthError>;

    /// Whether an account with this email already exists.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn email_taken(&self, email: &str) -> Result<bool, AuthError>;

    /// Resolve a presented token into a session with the live user attached.
    ///
    /// # Returns
    /// None when the token matches no session or the owning user is gone
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn resolve(&self, token: &str) -> Result<Option<Session>, AuthError>;

    /// Compose the delivered token for a session: raw key plus the signed
    /// role claim for the session's live user.
    ///
    /// # Errors
    /// * `Token` - Claim signing failed
    fn deliverable_token(&self, session: &Session) -> Result<String, AuthError>;
}

/// Persistence operations for session records.
#[async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Persist a new session record.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn insert(&self, record: SessionRecord) -> Result<(), AuthError>;

    /// Retrieve a session record by its exact key.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_key(&self, key: &str) -> Result<Option<SessionRecord>, AuthError>;

    /// Delete a session record by key. Deleting a missing key is not an
    /// error.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn delete_by_key(&self, key: &str) -> Result<(), AuthError>;
}
