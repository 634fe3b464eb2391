//! JSON response writer and the `erro` envelope.

use crate::error::ErrorBody;
use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt::Display;

/// Marker body returned by a lookup that matched no row.
pub const USER_NOT_FOUND: &str = "there is no user with this id";

/// Write `payload` as JSON with `status`. `None` writes the status and header only.
/// If serialization fails the failure is logged and an empty 500 is returned instead.
pub fn write_json<T: Serialize + ?Sized>(status: StatusCode, payload: Option<&T>) -> Response {
    let body = match payload {
        None => Body::empty(),
        Some(value) => match serde_json::to_vec(value) {
            Ok(bytes) => Body::from(bytes),
            Err(e) => {
                tracing::error!(error = %e, intended_status = status.as_u16(), "failed to serialize response body");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        },
    };
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// Wrap `err`'s message as `{ "erro": ... }` and write it with `status`.
pub fn write_error(status: StatusCode, err: &dyn Display) -> Response {
    write_json(status, Some(&ErrorBody { erro: err.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde::ser::Error as _;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refuses to serialize"))
        }
    }

    async fn body_of(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn writes_status_header_and_body() {
        let response = write_json(StatusCode::CREATED, Some(&serde_json::json!({"id": 1})));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_of(response).await, br#"{"id":1}"#);
    }

    #[tokio::test]
    async fn no_payload_means_empty_body() {
        let response = write_json::<()>(StatusCode::NO_CONTENT, None);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn serialization_failure_degrades_to_empty_500() {
        let response = write_json(StatusCode::OK, Some(&Unserializable));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn error_envelope_shape() {
        let response = write_error(StatusCode::UNPROCESSABLE_ENTITY, &"bad input");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, serde_json::json!({ "erro": "bad input" }));
    }

    #[tokio::test]
    async fn not_found_marker_is_a_json_string() {
        let response = write_json(StatusCode::OK, Some(USER_NOT_FOUND));
        assert_eq!(body_of(response).await, br#""there is no user with this id""#);
    }
}
