use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::session::errors::PasswordRuleError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Profile;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;

/// Random bytes drawn for a session key.
pub const SESSION_KEY_BYTES: usize = 48;
/// Length of the hex-encoded session key. The first `SESSION_KEY_LENGTH`
/// characters of any delivered token are the session lookup key; the rest
/// is the signed role claim.
pub const SESSION_KEY_LENGTH: usize = SESSION_KEY_BYTES * 2;

/// Name of the cookie carrying the delivered token.
pub const AUTH_COOKIE: &str = "khe_auth_next";

/// Persisted session row: opaque key plus the owning user's email.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub key: String,
    pub email: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// A resolved session with the owning user attached.
///
/// The user is always freshly fetched at resolution time, so role and
/// status checks see the live account even when the signed claim embedded
/// in an older token is stale.
#[derive(Debug, Clone)]
pub struct Session {
    pub key: String,
    pub email: String,
    pub user: User,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Role claim embedded in the delivered token's signed suffix.
///
/// Lets edge middleware make a fast provisional check without a database
/// round trip. Data-plane gates never trust it; they re-derive the role
/// from the live user record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleClaim {
    pub role: Role,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
}

impl RoleClaim {
    /// Claim for a role, issued now.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            iat: Utc::now().timestamp(),
        }
    }
}

/// Validated plaintext password for registration.
#[derive(Debug, Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 20;

    /// Validate a registration password.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 20 characters
    pub fn new(password: String) -> Result<Self, PasswordRuleError> {
        let length = password.len();
        if length < Self::MIN_LENGTH {
            Err(PasswordRuleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordRuleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which registration form produced the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterKind {
    User,
    Staff,
}

/// Command to register a new account.
///
/// Created accounts always start with the `pending` role and status.
#[derive(Debug)]
pub struct RegisterCommand {
    pub kind: RegisterKind,
    pub email: EmailAddress,
    pub password: Password,
    pub info: Profile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_length_is_hex_of_key_bytes() {
        assert_eq!(SESSION_KEY_LENGTH, 96);
    }

    #[test]
    fn test_password_rules() {
        assert!(Password::new("pw123456".to_string()).is_ok());
        assert!(matches!(
            Password::new("short".to_string()),
            Err(PasswordRuleError::TooShort { .. })
        ));
        assert!(matches!(
            Password::new("x".repeat(21)),
            Err(PasswordRuleError::TooLong { .. })
        ));
    }
}
