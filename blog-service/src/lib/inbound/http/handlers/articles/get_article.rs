use axum::extract::Path;
use axum::extract::State;

use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ArticleData;
use crate::inbound::http::router::AppState;

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let article_id =
        ArticleId::from_string(&article_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .article_service
        .get_article(article_id)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::ok(article.into()))
}
