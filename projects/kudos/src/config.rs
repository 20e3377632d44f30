use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use utils_trace::LogFormat;

use crate::auth::{ParseTokenTableError, StaticTokenAuthenticator};

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (HOST, default 0.0.0.0)
    pub host: IpAddr,
    /// Bind port (PORT, default 8000)
    pub port: u16,
    /// Postgres URL. Unset means kudos are kept in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections (DATABASE_MAX_CONNECTIONS, default 10)
    pub database_max_connections: u32,
    /// Bearer tokens accepted by the API (KUDO_AUTH_TOKENS, `token=email,...`)
    pub authenticator: StaticTokenAuthenticator,
    /// Default tracing filter (LOG_LEVEL, default info)
    pub log_level: String,
    /// LOG_FORMAT, `compact` or `json`
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
    #[error("Invalid KUDO_AUTH_TOKENS: {source}")]
    InvalidTokenTable {
        #[from]
        source: ParseTokenTableError,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset and blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host: IpAddr = get("HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HOST"))?;

        let port: u16 = get("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let database_max_connections = get("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let authenticator = StaticTokenAuthenticator::parse(&get("KUDO_AUTH_TOKENS").unwrap_or_default())?;

        let log_format = get("LOG_FORMAT")
            .map(|v| v.parse::<LogFormat>())
            .transpose()
            .map_err(|_| ConfigError::InvalidValue("LOG_FORMAT"))?
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            authenticator,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
