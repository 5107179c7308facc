use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_article(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(article_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let article_id =
        ArticleId::from_string(&article_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .article_service
        .delete_article(article_id, auth_user.user_id)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, "deleted", ()))
}
