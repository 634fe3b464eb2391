//! Load [`AppConfig`] from the process environment (or any key lookup).

use crate::config::types::{AppConfig, DatabaseConfig, ServerConfig};
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

impl AppConfig {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let db_defaults = DatabaseConfig::default();
        let server_defaults = ServerConfig::default();

        let database = DatabaseConfig {
            url: get("DATABASE_URL"),
            host: get("USERS_DB_HOST").unwrap_or(db_defaults.host),
            port: parse_or("USERS_DB_PORT", get("USERS_DB_PORT"), db_defaults.port)?,
            user: get("USERS_DB_USER").unwrap_or(db_defaults.user),
            // An empty password is legitimate, so it is read untrimmed and unfiltered.
            password: lookup("USERS_DB_PASSWORD").unwrap_or(db_defaults.password),
            name: get("USERS_DB_NAME").unwrap_or(db_defaults.name),
            charset: get("USERS_DB_CHARSET").unwrap_or(db_defaults.charset),
            time_zone: get("USERS_DB_TIMEZONE").unwrap_or(db_defaults.time_zone),
            max_connections: parse_or(
                "USERS_DB_MAX_CONNECTIONS",
                get("USERS_DB_MAX_CONNECTIONS"),
                db_defaults.max_connections,
            )?,
            acquire_timeout: secs_or(
                "USERS_DB_ACQUIRE_TIMEOUT_SECS",
                get("USERS_DB_ACQUIRE_TIMEOUT_SECS"),
                db_defaults.acquire_timeout,
            )?,
            statement_timeout: secs_or(
                "USERS_DB_STATEMENT_TIMEOUT_SECS",
                get("USERS_DB_STATEMENT_TIMEOUT_SECS"),
                db_defaults.statement_timeout,
            )?,
        };
        let server = ServerConfig {
            addr: get("USERS_LISTEN_ADDR").unwrap_or(server_defaults.addr),
            port: parse_or("USERS_LISTEN_PORT", get("USERS_LISTEN_PORT"), server_defaults.port)?,
        };

        let config = AppConfig { database, server };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn secs_or(key: &'static str, raw: Option<String>, default: Duration) -> Result<Duration, ConfigError> {
    parse_or(key, raw, default.as_secs()).map(Duration::from_secs)
}
