//! Store management handlers.

use super::{destroy_or_404, find_or_404, update_or_404};
use crate::{
    AppState,
    api::extract::{Json, Path},
    db::{
        Filter,
        models::{NewStore, Store, StoreChanges},
    },
    types::{ErrorBody, Result},
    validation::schemas,
};
use axum::{extract::State, http::StatusCode};
use serde_json::Value;

/// List all stores
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    responses(
        (status = 200, description = "List of stores", body = Vec<Store>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stores",
    security(("bearer" = []))
)]
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<Store>>> {
    Ok(Json(state.repo::<Store>().list(Filter::all()).await?))
}

/// Get a store by id
#[utoipa::path(
    get,
    path = "/api/v1/store/{id}",
    params(("id" = i64, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store", body = Store),
        (status = 404, description = "Store not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stores",
    security(("bearer" = []))
)]
pub async fn get_store(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Store>> {
    Ok(Json(find_or_404(&state, id).await?))
}

/// Create a store
#[utoipa::path(
    post,
    path = "/api/v1/store",
    request_body = NewStore,
    responses(
        (status = 201, description = "Store created", body = Store),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stores",
    security(("bearer" = []))
)]
pub async fn create_store(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Store>)> {
    let store: NewStore = schemas::CREATE_STORE.parse(&body)?;
    let created = state.repo::<Store>().create(&store).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a store
#[utoipa::path(
    patch,
    path = "/api/v1/store/{id}",
    params(("id" = i64, Path, description = "Store ID")),
    request_body = StoreChanges,
    responses(
        (status = 200, description = "Store updated successfully", body = String),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Store not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stores",
    security(("bearer" = []))
)]
pub async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<String> {
    let changes: StoreChanges = schemas::UPDATE_STORE.parse(&body)?;
    update_or_404::<Store, _>(&state, id, &changes).await
}

/// Delete a store
#[utoipa::path(
    delete,
    path = "/api/v1/store/{id}",
    params(("id" = i64, Path, description = "Store ID")),
    responses(
        (status = 204, description = "Store deleted"),
        (status = 404, description = "Store not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stores",
    security(("bearer" = []))
)]
pub async fn delete_store(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    destroy_or_404::<Store>(&state, id).await
}
