//! Routers the server binary composes.

pub mod common;
pub mod docs;
pub mod users;

pub use common::common_routes_with_ready;
pub use docs::docs_routes;
pub use users::user_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Every route the service exposes, with a request span around each call.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(docs_routes())
        .merge(user_routes(state))
        .layer(TraceLayer::new_for_http())
}
