//! Operational probes: liveness, database readiness, build version.

use crate::response::write_json;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use serde::Serialize;

/// Body shared by `/health` and `/ready`. `database` is only reported by `/ready`.
#[derive(Serialize)]
struct ProbeStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn liveness() -> Response {
    write_json(StatusCode::OK, Some(&ProbeStatus { status: "ok", database: None }))
}

/// 503 while the store cannot reach the database, so load balancers stop routing here.
async fn readiness(State(state): State<AppState>) -> Response {
    match state.users.ping().await {
        Ok(()) => write_json(
            StatusCode::OK,
            Some(&ProbeStatus { status: "ok", database: Some("ok") }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            write_json(
                StatusCode::SERVICE_UNAVAILABLE,
                Some(&ProbeStatus { status: "degraded", database: Some("unavailable") }),
            )
        }
    }
}

async fn build_info() -> Response {
    write_json(
        StatusCode::OK,
        Some(&BuildInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}
