use super::{destroy_or_404, find_or_404, update_or_404};
use crate::{
    AppState,
    api::extract::{Json, Path},
    db::{
        Filter,
        models::{NewProduct, Product, ProductChanges},
    },
    types::{ErrorBody, Result},
    validation::schemas,
};
use axum::{extract::State, http::StatusCode};
use serde_json::Value;

/// List all products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "products",
    security(("bearer" = []))
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.repo::<Product>().list(Filter::all()).await?))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/v1/product/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "products",
    security(("bearer" = []))
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    Ok(Json(find_or_404(&state, id).await?))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/v1/product",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Unauthorized")
    ),
    tag = "products",
    security(("bearer" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Product>)> {
    let product: NewProduct = schemas::CREATE_PRODUCT.parse(&body)?;
    let created = state.repo::<Product>().create(&product).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a product
#[utoipa::path(
    patch,
    path = "/api/v1/product/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductChanges,
    responses(
        (status = 200, description = "Product updated successfully", body = String),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Product not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "products",
    security(("bearer" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<String> {
    let changes: ProductChanges = schemas::UPDATE_PRODUCT.parse(&body)?;
    update_or_404::<Product, _>(&state, id, &changes).await
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/product/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "products",
    security(("bearer" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    destroy_or_404::<Product>(&state, id).await
}
