use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, username = %created_user.username, "user registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(*id))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn login(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<(String, User), UserError> {
        let user = match self.repository.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::debug!(username = %username, "login for unknown user");
                return Err(UserError::InvalidCredentials);
            }
        };

        let result = self.authenticator.authenticate(
            password,
            &user.password_hash,
            user.id.value(),
            user.username.as_str(),
        )?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok((result.access_token, user))
    }
}
