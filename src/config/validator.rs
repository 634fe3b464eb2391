//! Sanity checks on a loaded [`AppConfig`].

use crate::config::types::AppConfig;
use crate::error::ConfigError;

const UTF8_SPELLINGS: &[&str] = &["utf8", "utf-8", "unicode", "utf8mb4"];

/// Reject settings the service cannot run with. Called by the loader.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let db = &config.database;
    if !UTF8_SPELLINGS.contains(&db.charset.to_lowercase().as_str()) {
        return Err(ConfigError::UnsupportedCharset(db.charset.clone()));
    }
    if db.max_connections == 0 {
        return Err(ConfigError::Validation(
            "USERS_DB_MAX_CONNECTIONS must be at least 1".into(),
        ));
    }
    if db.statement_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "USERS_DB_STATEMENT_TIMEOUT_SECS must be at least 1".into(),
        ));
    }
    if db.url.is_none() && db.name.is_empty() {
        return Err(ConfigError::Validation("database name is empty".into()));
    }
    config.server.socket_addr()?;
    Ok(())
}
