//! User CRUD handlers: create, list, read, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::model::{User, UserPayload};
use crate::response::{write_json, USER_NOT_FOUND};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    response::Response,
};

fn parse_id(raw: &str) -> Result<u32, AppError> {
    raw.parse::<u32>()
        .map_err(|_| AppError::InvalidIdentifier(raw.to_string()))
}

fn read_payload(body: Result<Bytes, BytesRejection>) -> Result<UserPayload, AppError> {
    let bytes = body.map_err(AppError::BodyRead)?;
    serde_json::from_slice(&bytes).map_err(AppError::MalformedPayload)
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 422, description = "Body unreadable or not a user", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let payload = read_payload(body)?;
    let id = state.users.insert(&payload).await?;
    tracing::info!(id, "user created");
    Ok(write_json(StatusCode::CREATED, Some(&payload.into_user(id))))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users, highest id first", body = Vec<User>),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state.users.list().await?;
    Ok(write_json(StatusCode::OK, Some(&users)))
}

/// A missing user is answered with 200 and the string marker, not 404.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user, or the string \"there is no user with this id\"", body = User),
        (status = 422, description = "Id is not an unsigned 32-bit integer", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let response = match state.users.find(id).await? {
        Some(user) => write_json(StatusCode::OK, Some(&user)),
        None => write_json(StatusCode::OK, Some(USER_NOT_FOUND)),
    };
    Ok(response)
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = u32, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 204, description = "Name and email overwritten (also when no such user exists)"),
        (status = 422, description = "Bad id or body", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    let payload = read_payload(body)?;
    state.users.update(id, &payload).await?;
    tracing::info!(id, "user updated");
    Ok(write_json::<()>(StatusCode::NO_CONTENT, None))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = u32, Path, description = "User id")),
    responses(
        (status = 204, description = "User removed (also when no such user exists)"),
        (status = 422, description = "Id is not an unsigned 32-bit integer", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str)?;
    state.users.delete(id).await?;
    tracing::info!(id, "user deleted");
    Ok(write_json::<()>(StatusCode::NO_CONTENT, None))
}
