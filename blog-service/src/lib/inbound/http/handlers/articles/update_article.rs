use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ArticleData;
use crate::inbound::http::handlers::ArticleRequest;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_article(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(article_id): Path<String>,
    ApiJson(req): ApiJson<ArticleRequest>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let article_id =
        ArticleId::from_string(&article_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = req.try_into_command()?;

    state
        .article_service
        .update_article(article_id, auth_user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::OK, "updated", article.into()))
}
