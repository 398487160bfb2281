//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every handler's `utoipa::path` annotation. The raw
//! document is always served at `/api-docs/openapi.json`; with the
//! `swagger-ui` feature the interactive UI is mounted at `/api-docs`.

use crate::api::handlers::{auth, health, products, roles, stocks, stores, users};
use crate::db::models::{
    NewProduct, NewRole, NewStock, NewStore, NewUser, Product, ProductChanges, Role, RoleChanges,
    Stock, StockChanges, Store, StoreChanges, User, UserChanges,
};
use crate::types::{
    ErrorBody, LoginRequest, LoginResponse, MessageBody, PasswordChange, TokenValidity,
};
use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Path of the raw OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Registers the bearer token scheme referenced by gated paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token from POST /api/v1/auth/login, sent raw or as `Bearer <token>`",
                    ))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Stockroom API",
        description = "Multi-store inventory backend: users, stores, products, stock records and roles."
    ),
    paths(
        health::status,
        auth::login,
        auth::validate,
        users::list_users,
        users::list_users_by_store,
        users::get_user,
        users::create_user,
        users::update_user,
        users::update_user_password,
        users::delete_user,
        stores::list_stores,
        stores::get_store,
        stores::create_store,
        stores::update_store,
        stores::delete_store,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        stocks::list_stocks,
        stocks::list_stocks_by_product,
        stocks::list_stocks_by_store,
        stocks::get_stock,
        stocks::create_stock,
        stocks::update_stock,
        stocks::delete_stock,
        roles::list_roles,
        roles::get_role,
        roles::create_role,
        roles::update_role,
        roles::delete_role,
    ),
    components(schemas(
        LoginRequest, LoginResponse, TokenValidity, PasswordChange, MessageBody, ErrorBody,
        User, NewUser, UserChanges,
        Store, NewStore, StoreChanges,
        Product, NewProduct, ProductChanges,
        Stock, NewStock, StockChanges,
        Role, NewRole, RoleChanges,
    )),
    tags(
        (name = "auth", description = "Login and token validation"),
        (name = "users", description = "User accounts"),
        (name = "stores", description = "Stores"),
        (name = "products", description = "Products"),
        (name = "stocks", description = "Stock records per product and store"),
        (name = "roles", description = "User roles"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

/// Public documentation routes.
#[cfg(feature = "swagger-ui")]
pub fn docs_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    utoipa_swagger_ui::SwaggerUi::new("/api-docs")
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}

/// Public documentation routes.
#[cfg(not(feature = "swagger-ui"))]
pub fn docs_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        OPENAPI_JSON_PATH,
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    )
}
