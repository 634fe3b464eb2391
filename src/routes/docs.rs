//! OpenAPI document for the user resource.

use crate::error::ErrorBody;
use crate::handlers::users;
use crate::model::{User, UserPayload};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(users::create, users::list, users::read, users::update, users::delete),
    components(schemas(User, UserPayload, ErrorBody)),
    tags((name = "users", description = "User resource"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /openapi.json
pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_user_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];
        for method in ["get", "post"] {
            assert!(paths["/users"][method].is_object(), "/users {method}");
        }
        for method in ["get", "put", "delete"] {
            assert!(paths["/users/{id}"][method].is_object(), "/users/{{id}} {method}");
        }
        assert!(doc["components"]["schemas"]["User"].is_object());
    }
}
