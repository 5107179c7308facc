use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Secret shipped in the defaults; anything deployed should override it.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-this";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `debug` or `release`; selects the default log verbosity
    pub mode: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
}

impl ServerConfig {
    pub fn is_release(&self) -> bool {
        self.mode.eq_ignore_ascii_case("release")
    }
}

impl DatabaseConfig {
    /// sqlx connection URL for the configured file.
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path)
    }
}

impl CorsConfig {
    /// The single origin reflected in CORS responses: the first configured one, else `*`.
    pub fn origin(&self) -> &str {
        self.allow_origins
            .first()
            .map(String::as_str)
            .filter(|origin| !origin.is_empty())
            .unwrap_or("*")
    }
}

impl Config {
    /// Load configuration from defaults, files and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SERVER__PORT, JWT__SECRET, DATABASE__PATH, ...)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        ConfigBuilder::builder()
            .set_default("server.port", 8080)?
            .set_default("server.mode", "debug")?
            .set_default("database.path", "./blog.db")?
            .set_default("jwt.secret", DEFAULT_JWT_SECRET)?
            .set_default("jwt.expiration_hours", auth::DEFAULT_TOKEN_LIFETIME_HOURS)?
            .set_default("cors.allow_origins", vec!["*".to_string()])
    }

    /// Built-in defaults only, ignoring files and environment.
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }
}
