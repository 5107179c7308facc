use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cors::cors;
use super::handlers::articles::create_article;
use super::handlers::articles::delete_article;
use super::handlers::articles::get_article;
use super::handlers::articles::list_articles;
use super::handlers::articles::list_user_articles;
use super::handlers::articles::update_article;
use super::handlers::users::login;
use super::handlers::users::register;
use super::handlers::users::user_info;
use super::middleware::authenticate as auth_middleware;
use crate::domain::article::service::ArticleService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::SqliteArticleRepository;
use crate::outbound::repositories::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub article_service: Arc<ArticleService<SqliteArticleRepository>>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<UserService<SqliteUserRepository>>,
    article_service: Arc<ArticleService<SqliteArticleRepository>>,
    authenticator: Arc<Authenticator>,
    cors_origin: HeaderValue,
) -> Router {
    let state = AppState {
        user_service,
        article_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/articles", get(list_articles))
        .route("/api/articles/user/:user_id", get(list_user_articles))
        .route("/api/articles/:id", get(get_article));

    let protected_routes = Router::new()
        .route("/api/user/info", get(user_info))
        .route("/api/articles", post(create_article))
        .route("/api/articles/:id", put(update_article).delete(delete_article))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::debug!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(cors_origin, cors))
        .layer(trace_layer)
        .with_state(state)
}
