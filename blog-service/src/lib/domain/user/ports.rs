use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// Username and email uniqueness are checked before the password is hashed.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Check credentials and issue a session token.
    ///
    /// # Returns
    /// Signed token and the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Password` - Stored hash unreadable
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &Username, password: &str)
        -> Result<(String, User), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; the store assigns the id.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
