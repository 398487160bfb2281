use super::{destroy_or_404, find_or_404, update_or_404};
use crate::{
    AppState,
    api::extract::{Json, Path},
    db::{
        Filter,
        models::{NewRole, Role, RoleChanges},
    },
    types::{ErrorBody, Result},
    validation::schemas,
};
use axum::{extract::State, http::StatusCode};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    responses(
        (status = 200, description = "List of roles", body = Vec<Role>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "roles",
    security(("bearer" = []))
)]
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>> {
    Ok(Json(state.repo::<Role>().list(Filter::all()).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/role/{id}",
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = Role),
        (status = 404, description = "Role not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "roles",
    security(("bearer" = []))
)]
pub async fn get_role(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Role>> {
    Ok(Json(find_or_404(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/role",
    request_body = NewRole,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Unauthorized")
    ),
    tag = "roles",
    security(("bearer" = []))
)]
pub async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Role>)> {
    let role: NewRole = schemas::CREATE_ROLE.parse(&body)?;
    let created = state.repo::<Role>().create(&role).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/role/{id}",
    params(("id" = i64, Path, description = "Role ID")),
    request_body = RoleChanges,
    responses(
        (status = 200, description = "Role updated successfully", body = String),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Role not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "roles",
    security(("bearer" = []))
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<String> {
    let changes: RoleChanges = schemas::UPDATE_ROLE.parse(&body)?;
    update_or_404::<Role, _>(&state, id, &changes).await
}

#[utoipa::path(
    delete,
    path = "/api/v1/role/{id}",
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "roles",
    security(("bearer" = []))
)]
pub async fn delete_role(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    destroy_or_404::<Role>(&state, id).await
}
