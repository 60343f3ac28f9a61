use std::env;

use auth::AuthSettings;
use auth::HashingParams;
use auth::SigningSecret;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration.
///
/// Loaded once at start-up and passed down explicitly; nothing reads it
/// from global state.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub prod: bool,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: HashingParams,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_max_overflow")]
    pub max_overflow: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Rejected at load time when shorter than 40 characters
    pub secret: SigningSecret,
    pub expiration_minutes: i64,
}

fn default_pool_size() -> u32 {
    5
}

fn default_max_overflow() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_max_lifetime_secs() -> u64 {
    3600
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.), including
    ///    those set by `.env` (`.env.test` when RUN_MODE=test)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let dotenv_file = if run_mode == "test" { ".env.test" } else { ".env" };
        // A missing dotenv file is fine, the environment may be set already
        let _ = dotenvy::from_filename(dotenv_file);

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            secret: self.jwt.secret.clone(),
            access_token_minutes: self.jwt.expiration_minutes,
            hashing: self.password,
        }
    }
}
