use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::session::errors::AuthError;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::RoleClaim;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionRecord;
use crate::domain::session::models::SESSION_KEY_BYTES;
use crate::domain::session::models::SESSION_KEY_LENGTH;
use crate::domain::session::ports::AuthServicePort;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::ports::UserRepository;

/// Session store and authentication flows.
///
/// Sessions are persisted rows keyed by a random opaque key; the delivered
/// token appends a signed role claim to that key. Resolution always
/// re-fetches the owning user, so the claim is never an authorization
/// source on this path.
pub struct SessionService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    password_hasher: PasswordHasher,
    codec: TokenCodec,
}

impl<UR, SR> SessionService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `sessions` - Session persistence implementation
    /// * `secret` - Server-held secret for signing role claims
    pub fn new(users: Arc<UR>, sessions: Arc<SR>, secret: &[u8]) -> Self {
        Self {
            users,
            sessions,
            password_hasher: PasswordHasher::new(),
            codec: TokenCodec::new(secret),
        }
    }

    fn generate_key() -> String {
        let mut bytes = [0u8; SESSION_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Create a session for a user and prove it resolves.
    ///
    /// The fresh key is immediately looked back up; a session that cannot
    /// be resolved right after insertion violates the store invariant and
    /// is fatal for the call.
    async fn create(&self, user: &User) -> Result<Session, AuthError> {
        let key = Self::generate_key();
        let now = Utc::now();

        self.sessions
            .insert(SessionRecord {
                key: key.clone(),
                email: user.email.as_str().to_string(),
                created: now,
                updated: now,
            })
            .await?;

        self.resolve(&key).await?.ok_or(AuthError::SessionInvariant)
    }
}

#[async_trait]
impl<UR, SR> AuthServicePort for SessionService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let user = self.users.find_by_email(email).await?;

        let Some(user) = user else {
            return Err(AuthError::NotFound);
        };
        let Some(hash) = user.password_hash.as_deref() else {
            // Account exists but its password was never set
            return Err(AuthError::NotFound);
        };

        if !self.password_hasher.verify(password, hash) {
            return Err(AuthError::IncorrectCredentials);
        }

        let session = self.create(&user).await?;
        let token = self.deliverable_token(&session)?;

        Ok((user, token))
    }

    async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        self.sessions.delete_by_key(&session.key).await
    }

    async fn me(&self, token: &str) -> Result<Option<(User, String)>, AuthError> {
        let Some(session) = self.resolve(token).await? else {
            return Ok(None);
        };
        let token = self.deliverable_token(&session)?;
        Ok(Some((session.user, token)))
    }

    async fn register(&self, command: RegisterCommand) -> Result<(User, String), AuthError> {
        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| AuthError::Password(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash: Some(password_hash),
            role: Role::Pending,
            status: UserStatus::Pending,
            info: Some(command.info),
            created: now,
            updated: now,
        };

        let user = self.users.insert(user).await?;
        tracing::info!(email = %user.email, kind = ?command.kind, "Account registered");

        let session = self.create(&user).await?;
        let token = self.deliverable_token(&session)?;

        Ok((user, token))
    }

    async fn email_taken(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self.users.find_by_email(email).await?.is_some())
    }

    async fn resolve(&self, token: &str) -> Result<Option<Session>, AuthError> {
        // Only the fixed-length prefix is the lookup key; the remainder is
        // the signed role claim, which this path ignores.
        let Some(key) = token.get(..SESSION_KEY_LENGTH) else {
            return Ok(None);
        };

        let Some(record) = self.sessions.find_by_key(key).await? else {
            return Ok(None);
        };

        // Always the live user document, never the claim and never a cache
        let Some(user) = self.users.find_by_email(&record.email).await? else {
            tracing::warn!(email = %record.email, "Session references a missing user");
            return Ok(None);
        };

        Ok(Some(Session {
            key: record.key,
            email: record.email,
            user,
            created: record.created,
            updated: record.updated,
        }))
    }

    fn deliverable_token(&self, session: &Session) -> Result<String, AuthError> {
        let claim = RoleClaim::new(session.user.role);
        let suffix = self.codec.sign(&claim)?;
        Ok(format!("{}{}", session.key, suffix))
    }
}
