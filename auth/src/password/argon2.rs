use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Argon2id credential hasher.
///
/// Holds no state beyond the algorithm parameters, so one instance can be
/// shared across request handlers.
#[derive(Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Returns the PHC string (algorithm, parameters, salt and digest).
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`; only an unreadable stored hash is an error.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed or verification could not run
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid password hash: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}
