//! Application configuration management
//!
//! Configuration is read from environment variables (with `.env` support) once
//! at startup and validated before the server binds.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use coursegate_rules::calendar::PlatformCalendar;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_PLATFORM_UTC_OFFSET_MINUTES,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub engine: EngineConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub request_timeout: Duration,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Bearer token verification
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Policy engine settings
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Calendar used for day truncation of drip dates and deadlines
    pub calendar: PlatformCalendar,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            engine: EngineConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?;

        Ok(Self {
            host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            port: var("SERVER_PORT")
                .unwrap_or_else(|| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

impl EngineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("PLATFORM_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| DEFAULT_PLATFORM_UTC_OFFSET_MINUTES.to_string());
        Self::from_offset(&raw)
    }

    fn from_offset(raw: &str) -> Result<Self, ConfigError> {
        let calendar = raw
            .trim()
            .parse::<i32>()
            .ok()
            .and_then(PlatformCalendar::from_offset_minutes)
            .ok_or_else(|| ConfigError::InvalidValue("PLATFORM_UTC_OFFSET_MINUTES".to_string()))?;

        Ok(Self { calendar })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
