use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token lifetime used when none is configured: seven days.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 168;

/// Authentication coordinator combining password verification and token issuance.
///
/// Tokens are stateless: validity is decided by signature and expiry alone,
/// there is no server-side session table and no revocation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
    clock: Arc<dyn Clock>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with the default lifetime and the system clock.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_clock(
            jwt_secret,
            Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
            Arc::new(SystemClock),
        )
    }

    /// Create an authenticator with an explicit token lifetime and time source.
    pub fn with_clock(jwt_secret: &[u8], token_lifetime: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_lifetime,
            clock,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and, on success, issue a token for the user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = self.claims_for(user_id, username);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Issue a signed token valid from now for the configured lifetime.
    pub fn issue_token(&self, user_id: i64, username: &str) -> Result<String, JwtError> {
        let claims = self.claims_for(user_id, username);
        let token = self.jwt_handler.encode(&claims)?;
        tracing::debug!(user_id, exp = claims.exp, "token issued");
        Ok(token)
    }

    /// Check signature and expiry, returning the claims of a valid token.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, tampered or signed with another secret
    /// * `TokenExpired` - `exp <= now`
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(self.clock.now()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    fn claims_for(&self, user_id: i64, username: &str) -> Claims {
        Claims::for_user(user_id, username, self.clock.now(), self.token_lifetime)
    }
}
