//! Storage gateway: builds the PostgreSQL pool the handlers acquire connections from.

use crate::config::DatabaseConfig;
use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;

/// Charset sent to the server. Anything else was rejected while loading config.
const CLIENT_ENCODING: &str = "UTF8";

/// Connection target from config. `DATABASE_URL` wins over the discrete fields; charset and
/// time zone are applied as session options either way.
pub fn connect_options(db: &DatabaseConfig) -> Result<PgConnectOptions, ConfigError> {
    let base = match &db.url {
        Some(url) => PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl)?,
        None => PgConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .username(&db.user)
            .password(&db.password)
            .database(&db.name),
    };
    Ok(base.options([
        ("client_encoding", CLIENT_ENCODING),
        ("TimeZone", db.time_zone.as_str()),
    ]))
}

/// Open the pool and verify the database answers before returning it.
pub async fn connect(db: &DatabaseConfig) -> Result<PgPool, Box<dyn std::error::Error + Send + Sync>> {
    let options = connect_options(db)?;
    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout)
        .connect_with(options)
        .await?;
    ping(&pool).await?;
    tracing::info!(
        max_connections = db.max_connections,
        "connected to the users database"
    );
    Ok(pool)
}

/// Liveness check on a pooled connection.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
