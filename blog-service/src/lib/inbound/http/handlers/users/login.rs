use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::models::Username;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A name that could never have been registered is just another bad login
    let username = Username::new(body.username).map_err(|_| UserError::InvalidCredentials)?;

    let (token, user) = state.user_service.login(&username, &body.password).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "logged in",
        LoginResponseData {
            token,
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: UserData,
}
