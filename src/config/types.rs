//! Process configuration: database target, pool sizing, deadlines, listen address.

use std::net::SocketAddr;
use std::time::Duration;

/// Where and how to reach PostgreSQL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// When set, host/port/user/password/name below are taken from this URL instead.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Client encoding. Only UTF-8 spellings pass validation; sqlx decodes text as UTF-8.
    pub charset: String,
    /// Session `TimeZone` used by the server when rendering timestamps.
    pub time_zone: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Deadline applied around every statement a handler runs.
    pub statement_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: None,
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: String::new(),
            name: "users".into(),
            charset: "UTF8".into(),
            time_zone: "UTC".into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
            statement_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, crate::error::ConfigError> {
        format!("{}:{}", self.addr, self.port)
            .parse()
            .map_err(|_| crate::error::ConfigError::Invalid {
                key: "USERS_LISTEN_ADDR",
                value: self.addr.clone(),
            })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}
