use crate::AppState;
use crate::api::handlers::{auth, health, products, roles, stocks, stores, users};
use crate::api::openapi;
use crate::auth::middleware::auth_gate;
use axum::{
    Router,
    http::{HeaderValue, header},
    middleware,
    routing::{get, patch, post},
};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Builds the full application router.
///
/// Login and every resource route sit behind [`auth_gate`] (login being the
/// gate's one exemption). The status probe, token validation and the API
/// docs are mounted outside it.
pub fn create_router(state: AppState) -> Router {
    let gated_routes = Router::new()
        .route("/api/v1/auth/login", post(auth::login))
        // Users
        .route("/api/v1/users", get(users::list_users))
        .route("/api/v1/users/{store_id}", get(users::list_users_by_store))
        .route("/api/v1/user", post(users::create_user))
        .route(
            "/api/v1/user/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/v1/user/password/{id}",
            patch(users::update_user_password),
        )
        // Stores
        .route("/api/v1/stores", get(stores::list_stores))
        .route("/api/v1/store", post(stores::create_store))
        .route(
            "/api/v1/store/{id}",
            get(stores::get_store)
                .patch(stores::update_store)
                .delete(stores::delete_store),
        )
        // Products
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/product", post(products::create_product))
        .route(
            "/api/v1/product/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        // Stocks
        .route("/api/v1/stocks", get(stocks::list_stocks))
        .route(
            "/api/v1/stocks/product/{product_id}",
            get(stocks::list_stocks_by_product),
        )
        .route(
            "/api/v1/stocks/store/{store_id}",
            get(stocks::list_stocks_by_store),
        )
        .route("/api/v1/stock", post(stocks::create_stock))
        .route(
            "/api/v1/stock/{id}",
            get(stocks::get_stock)
                .patch(stocks::update_stock)
                .delete(stocks::delete_stock),
        )
        // Roles
        .route("/api/v1/roles", get(roles::list_roles))
        .route("/api/v1/role", post(roles::create_role))
        .route(
            "/api/v1/role/{id}",
            get(roles::get_role)
                .patch(roles::update_role)
                .delete(roles::delete_role),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_gate,
        ));

    let public_routes = Router::new()
        .route("/status", get(health::status))
        .route("/api/v1/auth/validate", get(auth::validate))
        .merge(openapi::docs_router());

    let body_limit = state.config.server.body_limit_bytes;

    public_routes
        .merge(gated_routes)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
