//! Authentication utilities for the blog service
//!
//! - Password hashing (Argon2id)
//! - Session tokens: HS256 JWTs carrying user id and username, with an
//!   expiry judged against an injectable [`Clock`]
//! - [`Authenticator`], which ties the two together for login
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Login and token verification
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let result = auth.authenticate("password123", &hash, 1, "alice").unwrap();
//!
//! let claims = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::DEFAULT_TOKEN_LIFETIME_HOURS;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
