//! Typed errors and HTTP mapping.

use crate::response::write_error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("unsupported charset '{0}': the driver only speaks UTF-8")]
    UnsupportedCharset(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

/// Everything a user request can fail with. The `Display` text is what clients see;
/// driver errors are kept as sources and only logged.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("an error occurred while reading the request body")]
    BodyRead(#[source] axum::extract::rejection::BytesRejection),
    #[error("an error occurred when converting user to struct")]
    MalformedPayload(#[source] serde_json::Error),
    #[error("the user id must be an unsigned 32-bit integer")]
    InvalidIdentifier(String),
    #[error("an error occurred while connecting to database")]
    Connection(#[source] sqlx::Error),
    #[error("an error occurred while creating statement")]
    StatementPrepare(#[source] sqlx::Error),
    #[error("an error occurred while running statement")]
    StatementExecute(#[source] sqlx::Error),
    #[error("an error occurred while reading users")]
    Scan(#[source] sqlx::Error),
    #[error("an error occurred while getting id")]
    ResultExtraction(String),
    #[error("the database did not answer in time")]
    DeadlineExceeded,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BodyRead(_) | AppError::MalformedPayload(_) | AppError::InvalidIdentifier(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Connection(_)
            | AppError::StatementPrepare(_)
            | AppError::StatementExecute(_)
            | AppError::Scan(_)
            | AppError::ResultExtraction(_)
            | AppError::DeadlineExceeded => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::BodyRead(e) => e.to_string(),
            AppError::MalformedPayload(e) => e.to_string(),
            AppError::InvalidIdentifier(raw) => format!("got '{}'", raw),
            AppError::Connection(e)
            | AppError::StatementPrepare(e)
            | AppError::StatementExecute(e)
            | AppError::Scan(e) => e.to_string(),
            AppError::ResultExtraction(why) => why.clone(),
            AppError::DeadlineExceeded => "deadline elapsed".into(),
        }
    }
}

/// The fixed error envelope: `{ "erro": <message> }`.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub erro: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %self.detail(), "{}", self);
        } else {
            tracing::debug!(status = status.as_u16(), detail = %self.detail(), "{}", self);
        }
        write_error(status, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn client_errors_map_to_422() {
        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AppError::MalformedPayload(malformed).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            AppError::InvalidIdentifier("abc".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn storage_errors_map_to_500() {
        for err in [
            AppError::Connection(sqlx::Error::PoolTimedOut),
            AppError::StatementPrepare(sqlx::Error::PoolClosed),
            AppError::StatementExecute(sqlx::Error::RowNotFound),
            AppError::Scan(sqlx::Error::ColumnNotFound("name".into())),
            AppError::ResultExtraction("no id".into()),
            AppError::DeadlineExceeded,
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR, "{err}");
        }
    }

    #[tokio::test]
    async fn response_uses_erro_envelope_without_driver_detail() {
        let response = AppError::Connection(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "erro": "an error occurred while connecting to database" })
        );
    }
}
