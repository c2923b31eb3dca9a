use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API. An empty list mirrors the
    /// request origin (development mode).
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Production deployments get hardened response headers.
    #[serde(default)]
    pub production: bool,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Upload root; category subfolders are created underneath at startup.
    pub upload_dir: PathBuf,
    pub max_image_bytes: u64,
    pub max_video_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_image_bytes: 5 * 1024 * 1024,
            max_video_bytes: 100 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from `config/config.toml` (optional) overridden by
    /// `FOUNDATION__`-prefixed environment variables. Fails when
    /// `database.url` or `auth.jwt_secret` is absent, which aborts startup.
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., FOUNDATION__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("FOUNDATION").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

fn default_cors_max_age() -> u64 {
    3600
}

fn default_token_ttl_hours() -> i64 {
    24
}
