use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "registered", user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
    email: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        RegisterUserCommand::new(username, email, self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.value(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
