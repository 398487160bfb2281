//! User management handlers.
//!
//! Passwords are hashed before they reach the store, on create, on update
//! and on password change. Reads go through [`User`], which has no password
//! field at all.

use super::{destroy_or_404, find_or_404, update_or_404};
use crate::{
    AppState,
    api::extract::{Json, Path},
    db::{
        Filter,
        models::{Model, NewUser, User, UserChanges, UserCredentials},
    },
    types::{AppError, ErrorBody, MessageBody, PasswordChange, Result},
    validation::schemas,
};
use axum::{extract::State, http::StatusCode};
use serde_json::Value;

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.repo::<User>().list(Filter::all()).await?))
}

/// List the users attached to one store
#[utoipa::path(
    get,
    path = "/api/v1/users/{store_id}",
    params(("store_id" = i64, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Users of the store", body = Vec<User>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn list_users_by_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> Result<Json<Vec<User>>> {
    let filter = Filter::eq("store_id", store_id);
    Ok(Json(state.repo::<User>().list(filter).await?))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/user/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<User>> {
    Ok(Json(find_or_404(&state, id).await?))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<User>)> {
    let mut user: NewUser = schemas::CREATE_USER.parse(&body)?;
    user.password = state.hasher.hash_async(&user.password).await?;

    let created = state.repo::<User>().create(&user).await?;
    tracing::info!(user_id = created.id, "user created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a user
#[utoipa::path(
    patch,
    path = "/api/v1/user/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserChanges,
    responses(
        (status = 200, description = "User updated successfully", body = String),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<String> {
    let mut changes: UserChanges = schemas::UPDATE_USER.parse(&body)?;
    if let Some(password) = changes.password.take() {
        changes.password = Some(state.hasher.hash_async(&password).await?);
    }

    update_or_404::<User, _>(&state, id, &changes).await
}

/// Change a user's password, given the current one
#[utoipa::path(
    patch,
    path = "/api/v1/user/password/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = PasswordChange,
    responses(
        (status = 200, description = "Password updated successfully", body = String),
        (status = 400, description = "Validation failed or wrong password", body = MessageBody),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn update_user_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<String> {
    let change: PasswordChange = schemas::UPDATE_USER_PASSWORD.parse(&body)?;
    let user: UserCredentials = find_or_404(&state, id).await?;

    if !state.hasher.verify(&change.password, &user.password).await {
        tracing::warn!(user_id = id, "password change rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let changes = UserChanges {
        password: Some(state.hasher.hash_async(&change.new_password).await?),
        ..Default::default()
    };

    if state.repo::<User>().update(id, &changes).await? {
        Ok("Password updated successfully".to_string())
    } else {
        Err(AppError::NotFound(User::not_found()))
    }
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/user/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    destroy_or_404::<User>(&state, id).await
}
