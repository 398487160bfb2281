//! Stock record handlers.
//!
//! Reads nest the stocked `Product` and the holding `Store`. The full
//! listing leaves out stock rows whose product or store does not exist;
//! lookups by id, product or store keep them with `null` in place.

use super::{destroy_or_404, find_or_404, update_or_404};
use crate::{
    AppState,
    api::extract::{Json, Path},
    db::{
        Filter,
        models::{NewStock, Stock, StockChanges},
    },
    types::{ErrorBody, Result},
    validation::schemas,
};
use axum::{extract::State, http::StatusCode};
use serde_json::Value;

/// List all stock records
#[utoipa::path(
    get,
    path = "/api/v1/stocks",
    responses(
        (status = 200, description = "List of stock records", body = Vec<Stock>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stocks",
    security(("bearer" = []))
)]
pub async fn list_stocks(State(state): State<AppState>) -> Result<Json<Vec<Stock>>> {
    Ok(Json(state.repo::<Stock>().list(Filter::all()).await?))
}

/// List stock records for one product
#[utoipa::path(
    get,
    path = "/api/v1/stocks/product/{product_id}",
    params(("product_id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Stock records of the product", body = Vec<Stock>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stocks",
    security(("bearer" = []))
)]
pub async fn list_stocks_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<Vec<Stock>>> {
    let filter = Filter::eq("product_id", product_id);
    Ok(Json(state.repo::<Stock>().list_nested(filter).await?))
}

/// List stock records held by one store
#[utoipa::path(
    get,
    path = "/api/v1/stocks/store/{store_id}",
    params(("store_id" = i64, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Stock records of the store", body = Vec<Stock>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stocks",
    security(("bearer" = []))
)]
pub async fn list_stocks_by_store(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> Result<Json<Vec<Stock>>> {
    let filter = Filter::eq("store_id", store_id);
    Ok(Json(state.repo::<Stock>().list_nested(filter).await?))
}

/// Get a stock record by id
#[utoipa::path(
    get,
    path = "/api/v1/stock/{id}",
    params(("id" = i64, Path, description = "Stock ID")),
    responses(
        (status = 200, description = "Stock record", body = Stock),
        (status = 404, description = "Stock not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stocks",
    security(("bearer" = []))
)]
pub async fn get_stock(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Stock>> {
    Ok(Json(find_or_404(&state, id).await?))
}

/// Create a stock record
#[utoipa::path(
    post,
    path = "/api/v1/stock",
    request_body = NewStock,
    responses(
        (status = 201, description = "Stock created", body = Stock),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stocks",
    security(("bearer" = []))
)]
pub async fn create_stock(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Stock>)> {
    let stock: NewStock = schemas::CREATE_STOCK.parse(&body)?;
    let created = state.repo::<Stock>().create(&stock).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a stock record
#[utoipa::path(
    patch,
    path = "/api/v1/stock/{id}",
    params(("id" = i64, Path, description = "Stock ID")),
    request_body = StockChanges,
    responses(
        (status = 200, description = "Stock updated successfully", body = String),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Stock not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stocks",
    security(("bearer" = []))
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<String> {
    let changes: StockChanges = schemas::UPDATE_STOCK.parse(&body)?;
    update_or_404::<Stock, _>(&state, id, &changes).await
}

/// Delete a stock record
#[utoipa::path(
    delete,
    path = "/api/v1/stock/{id}",
    params(("id" = i64, Path, description = "Stock ID")),
    responses(
        (status = 204, description = "Stock deleted"),
        (status = 404, description = "Stock not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stocks",
    security(("bearer" = []))
)]
pub async fn delete_stock(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    destroy_or_404::<Stock>(&state, id).await
}
