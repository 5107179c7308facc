use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,
}
