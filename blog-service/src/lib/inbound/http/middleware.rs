use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Verified caller identity, stored in request extensions by [`authenticate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that validates bearer tokens and adds the caller to request extensions.
///
/// Only the token is consulted; the database is never touched here.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).map_err(|e| e.into_response())?;

    let claims = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "token rejected");
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "token subject is not a user id");
        ApiError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    parse_bearer(value).ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}

/// `Bearer <token>` with a single space and a token free of whitespace.
fn parse_bearer(value: &str) -> Option<&str> {
    match value.split_once(' ') {
        Some(("Bearer", token))
            if !token.is_empty() && !token.contains(char::is_whitespace) =>
        {
            Some(token)
        }
        _ => None,
    }
}
