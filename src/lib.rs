//! users-api: REST backend for a single user resource over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{User, UserPayload};
pub use response::{write_error, write_json};
pub use routes::{app, common_routes_with_ready, docs_routes, user_routes};
pub use service::{PgUserStore, UserStore};
pub use state::AppState;
pub use store::connect;
pub use telemetry::init_tracing;
