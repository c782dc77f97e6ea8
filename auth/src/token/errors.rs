use thiserror::Error;

/// Error type for signed-claim token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign claim: {0}")]
    SigningFailed(String),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,
}
