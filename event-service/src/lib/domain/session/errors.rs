use auth::TokenError;
use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for registration password rule failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordRuleError {
    #[error("Must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Must be no more than {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for authentication and session operations.
///
/// Every variant carries a stable, user-presentable message; internal
/// detail stays in the logs.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login against an email with no account (or no password set).
    #[error("This account does not exist")]
    NotFound,

    #[error("Incorrect password")]
    IncorrectCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("You lack the required permissions")]
    Forbidden,

    #[error("This email is already registered")]
    EmailTaken,

    /// Token codec failure: malformed suffix or invalid signature.
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Password hashing failed: {0}")]
    Password(String),

    /// A freshly created session failed its round-trip lookup. Fatal.
    #[error("Session could not be established")]
    SessionInvariant,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AuthError::NotFound,
            UserError::EmailAlreadyExists(_) => AuthError::EmailTaken,
            other => AuthError::Database(other.to_string()),
        }
    }
}
