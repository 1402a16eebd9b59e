//! Service configuration.
//!
//! Loaded from environment variables (a `.env` file is read first by
//! `main`) with fallback to defaults.

use axum::http::HeaderValue;
use std::env;
use std::time::Duration;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// PostgreSQL connection string
    pub database_url: String,

    /// Pool size
    pub database_max_connections: u32,

    /// How long a cached silver rate may be served
    pub rate_cache_ttl: Duration,

    /// Portal origin allowed to call the API cross-origin
    pub cors_allowed_origin: Option<HeaderValue>,

    /// Directory served under /static
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("DATABASE_URL".to_string()))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?;

        let rate_cache_ttl_secs: u64 = lookup("RATE_CACHE_TTL_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("RATE_CACHE_TTL_SECS".to_string()))?;
        if rate_cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue("RATE_CACHE_TTL_SECS".to_string()));
        }

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidValue("CORS_ALLOWED_ORIGIN".to_string()))
            })
            .transpose()?;

        Ok(Config {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            database_url,
            database_max_connections,
            rate_cache_ttl: Duration::from_secs(rate_cache_ttl_secs),
            cors_allowed_origin,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
