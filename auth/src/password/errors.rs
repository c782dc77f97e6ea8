use thiserror::Error;

/// Error type for password operations.
///
/// Verification never errors; a malformed digest fails closed instead.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
