use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user ID: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Input validation
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password must not be empty")]
    EmptyPassword,

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("User not found with username: {0}")]
    NotFoundByUsername(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password hashing error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::AuthenticationError> for UserError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => UserError::Password(e),
            auth::AuthenticationError::JwtError(e) => UserError::Token(e),
        }
    }
}
