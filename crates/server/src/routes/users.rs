use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use common::types::Message;
use service::{dto::UserDto, user_service};

use crate::{
    errors::{resolve_id, JsonApiError},
    state::ServerState,
};

const NOT_FOUND: &str = "User not found";

/// Both fields are optional here so that absence can be reported with the
/// API's own message instead of a deserializer error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserInput {
    pub name: String,
    pub email: String,
}

#[utoipa::path(
    get, path = "/users/", tag = "users",
    responses((status = 200, description = "A list of users", body = [UserDto]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserDto>>, JsonApiError> {
    let users = user_service::get_all_users(&state.db).await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "ID of the user")),
    responses(
        (status = 200, description = "A user", body = UserDto),
        (status = 404, description = "User not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn get(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<UserDto>, JsonApiError> {
    let id = resolve_id(id, NOT_FOUND)?;
    match user_service::get_user_by_id(&state.db, id).await? {
        Some(u) => Ok(Json(u.into())),
        None => Err(JsonApiError::not_found(NOT_FOUND)),
    }
}

/// Checks run in a fixed order and stop at the first failure: presence,
/// email not taken, email format, name length.
#[utoipa::path(
    post, path = "/users/", tag = "users",
    request_body = CreateUserInput,
    responses(
        (status = 201, description = "User created successfully", body = UserDto),
        (status = 400, description = "Invalid input", body = crate::openapi::MessageResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), JsonApiError> {
    let Json(input) = payload?;

    let (Some(name), Some(email)) = (input.name, input.email) else {
        return Err(JsonApiError::bad_request("Name and email are required"));
    };

    if user_service::get_user_by_email(&state.db, &email).await?.is_some() {
        return Err(JsonApiError::bad_request("Email already in use"));
    }

    if !user_service::is_valid_email(&email) {
        return Err(JsonApiError::bad_request("Invalid email format"));
    }

    let name_len = name.chars().count();
    if !(3..=50).contains(&name_len) {
        return Err(JsonApiError::bad_request("Name should be between 3 and 50 characters"));
    }

    let user = user_service::create_user(&state.db, &name, &email).await?;
    info!(id = user.id, "created user");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Overwrites name and email without re-running the creation checks.
#[utoipa::path(
    put, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "ID of the user")),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "User updated successfully", body = UserDto),
        (status = 400, description = "Malformed body", body = crate::openapi::MessageResponse),
        (status = 404, description = "User not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateUserInput>, JsonRejection>,
) -> Result<Json<UserDto>, JsonApiError> {
    let id = resolve_id(id, NOT_FOUND)?;
    let Json(input) = payload?;
    match user_service::update_user(&state.db, id, &input.name, &input.email).await? {
        Some(u) => {
            info!(id = u.id, "updated user");
            Ok(Json(u.into()))
        }
        None => Err(JsonApiError::not_found(NOT_FOUND)),
    }
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "ID of the user")),
    responses(
        (status = 200, description = "User deleted successfully", body = crate::openapi::MessageResponse),
        (status = 404, description = "User not found", body = crate::openapi::MessageResponse)
    )
)]
pub async fn delete(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<Message>, JsonApiError> {
    let id = resolve_id(id, NOT_FOUND)?;
    if user_service::delete_user(&state.db, id).await? {
        info!(id, "deleted user");
        Ok(Json(Message::new("User deleted")))
    } else {
        Err(JsonApiError::not_found(NOT_FOUND))
    }
}
