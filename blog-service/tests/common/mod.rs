use std::sync::Arc;

use auth::Authenticator;
use auth::ManualClock;
use axum::http::HeaderValue;
use blog_service::domain::article::service::ArticleService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::database::MIGRATOR;
use blog_service::outbound::repositories::SqliteArticleRepository;
use blog_service::outbound::repositories::SqliteUserRepository;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub clock: Arc<ManualClock>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // One long-lived connection: every new in-memory connection is a fresh database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let authenticator = Arc::new(Authenticator::with_clock(
            JWT_SECRET,
            Duration::hours(TOKEN_LIFETIME_HOURS),
            clock.clone(),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            authenticator.clone(),
        ));
        let article_service = Arc::new(ArticleService::new(Arc::new(
            SqliteArticleRepository::new(pool.clone()),
        )));

        let router = create_router(
            user_service,
            article_service,
            authenticator,
            HeaderValue::from_static("*"),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            pool,
            clock,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user, asserting success, and return the response body.
    pub async fn register(&self, username: &str, password: &str, email: &str) -> Value {
        let response = self
            .post("/api/register")
            .json(&json!({
                "username": username,
                "password": password,
                "email": email
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the issued token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string()
    }

    /// Register and log in a user whose email is derived from the username.
    pub async fn signed_up(&self, username: &str) -> String {
        self.register(username, "pw", &format!("{}@example.com", username))
            .await;
        self.login(username, "pw").await
    }

    /// Create an article as the token holder and return its id.
    pub async fn create_article(&self, token: &str, title: &str, content: &str) -> i64 {
        let response = self
            .post_authenticated("/api/articles", token)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("article id missing")
    }
}
