//! users-api server: loads config from the environment, opens the pool, serves the user routes.
//!
//! Run from repo root: `cargo run -p users-api-server`

use std::sync::Arc;
use tokio::net::TcpListener;
use users_api::{app, connect, init_tracing, AppConfig, AppState, PgUserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        e
    })?;

    let pool = connect(&config.database).await.map_err(|e| {
        tracing::error!(error = %e, "failed to connect to the database");
        e
    })?;
    let store = PgUserStore::new(pool, config.database.statement_timeout);
    let state = AppState::new(Arc::new(store));

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
