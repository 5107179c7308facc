use std::sync::Arc;

use auth::Authenticator;
use auth::SystemClock;
use axum::http::HeaderValue;
use blog_service::config::Config;
use blog_service::config::DEFAULT_JWT_SECRET;
use blog_service::domain::article::service::ArticleService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::database;
use blog_service::outbound::repositories::SqliteArticleRepository;
use blog_service::outbound::repositories::SqliteUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    let default_filter = if config.server.is_release() {
        "blog_service=info,auth=info,tower_http=info"
    } else {
        "blog_service=debug,auth=debug,tower_http=debug"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        database_path = %config.database.path,
        port = config.server.port,
        mode = %config.server.mode,
        jwt_expiration_hours = config.jwt.expiration_hours,
        cors_origin = %config.cors.origin(),
        "Configuration loaded"
    );

    if config.jwt.secret == DEFAULT_JWT_SECRET {
        tracing::warn!("Using the built-in JWT secret; set JWT__SECRET before deploying");
    }

    let pool = database::connect(&config.database).await?;
    tracing::info!(database = "sqlite", "Database connection pool created");

    database::MIGRATOR.run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_clock(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
        Arc::new(SystemClock),
    ));

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let article_repository = Arc::new(SqliteArticleRepository::new(pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let article_service = Arc::new(ArticleService::new(article_repository));

    let cors_origin = HeaderValue::from_str(config.cors.origin())?;

    let http_address = format!("0.0.0.0:{}", config.server.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, article_service, authenticator, cors_origin);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
