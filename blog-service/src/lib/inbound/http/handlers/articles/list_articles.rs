use axum::extract::Path;
use axum::extract::State;

use crate::domain::article::models::Article;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ArticleData;
use crate::inbound::http::router::AppState;

pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ArticleData>>, ApiError> {
    let articles = state.article_service.list_articles().await?;

    Ok(ApiSuccess::ok(to_data(&articles)))
}

pub async fn list_user_articles(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<Vec<ArticleData>>, ApiError> {
    let user_id =
        UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let articles = state.article_service.list_user_articles(user_id).await?;

    Ok(ApiSuccess::ok(to_data(&articles)))
}

fn to_data(articles: &[Article]) -> Vec<ArticleData> {
    articles.iter().map(ArticleData::from).collect()
}
