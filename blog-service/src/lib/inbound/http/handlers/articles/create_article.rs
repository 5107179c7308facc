use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ArticleData;
use crate::inbound::http::handlers::ArticleRequest;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_article(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<ArticleRequest>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .article_service
        .create_article(command, auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::OK, "created", article.into()))
}
