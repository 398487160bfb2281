//! API integration tests
//!
//! Drive the full router (gate, handlers, in-memory store) through axum-test.

mod common;

use axum::http::{HeaderValue, StatusCode, header};
use common::{
    ADMIN_EMAIL, ADMIN_PASSWORD, FailingStore, TestApp, spawn_app, test_server, test_state,
};
use serde_json::{Value, json};
use std::sync::Arc;

async fn create(app: &TestApp, path: &str, body: Value) -> Value {
    let response = app
        .server
        .post(path)
        .authorization_bearer(&app.token)
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

/// Store 1, product 1 and a stock of 10 linking them.
async fn seed_inventory(app: &TestApp) -> (i64, i64, i64) {
    let store = create(
        app,
        "/api/v1/store",
        json!({ "name": "Main Street", "address": "1 Main Street" }),
    )
    .await;
    let store_id = store["id"].as_i64().expect("store id");

    let product = create(
        app,
        "/api/v1/product",
        json!({
            "name": "Widget",
            "description": "A standard widget",
            "price": 250,
            "stock_id": 1,
            "store_id": store_id
        }),
    )
    .await;
    let product_id = product["id"].as_i64().expect("product id");

    let stock = create(
        app,
        "/api/v1/stock",
        json!({ "product_id": product_id, "store_id": store_id, "quantity": 10 }),
    )
    .await;
    let stock_id = stock["id"].as_i64().expect("stock id");

    (store_id, product_id, stock_id)
}

// ============= Health Check Tests =============

#[tokio::test]
async fn test_status_is_public() {
    let app = spawn_app().await;

    let response = app.server.get("/status").await;
    response.assert_status_ok();
    response.assert_text("Server is running!");
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = spawn_app().await;

    let response = app.server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/api/v1/user"].is_object());
}

// ============= Authentication Tests =============

#[tokio::test]
async fn test_login_success() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "login success");

    let token = body["token"].as_str().expect("token");
    assert!(app.state.tokens.verify(token));
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let app = spawn_app().await;

    let wrong_password = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": "wrongpass1" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "nobody@test.com", "password": ADMIN_PASSWORD }))
        .await;

    for response in [wrong_password, unknown_email] {
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "message": "invalid data" }));
    }
}

#[tokio::test]
async fn test_login_validation_uses_message_key() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "not-an-email", "password": ADMIN_PASSWORD }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].is_string());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_validate_without_token() {
    let app = spawn_app().await;

    let response = app.server.get("/api/v1/auth/validate").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Token not provided" }));
}

#[tokio::test]
async fn test_validate_reports_validity() {
    let app = spawn_app().await;

    let valid = app
        .server
        .get("/api/v1/auth/validate")
        .authorization_bearer(&app.token)
        .await;
    valid.assert_status_ok();
    valid.assert_json(&json!({ "isValid": true }));

    let invalid = app
        .server
        .get("/api/v1/auth/validate")
        .authorization_bearer("not.a.token")
        .await;
    invalid.assert_status(StatusCode::UNAUTHORIZED);
    invalid.assert_json(&json!({ "isValid": false }));
}

// ============= Gate Tests =============

#[tokio::test]
async fn test_resources_require_token() {
    let app = spawn_app().await;

    for path in [
        "/api/v1/users",
        "/api/v1/stores",
        "/api/v1/products",
        "/api/v1/stocks",
        "/api/v1/roles",
    ] {
        let response = app.server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_text("Unauthorized");
    }
}

#[tokio::test]
async fn test_raw_token_without_bearer_prefix_is_accepted() {
    let app = spawn_app().await;

    let response = app
        .server
        .get("/api/v1/stores")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&app.token).expect("header value"),
        )
        .await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

// ============= User Tests =============

#[tokio::test]
async fn test_create_user_never_returns_password() {
    let app = spawn_app().await;

    let created = create(
        &app,
        "/api/v1/user",
        json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@test.com",
            "password": "password123",
            "role_id": 1
        }),
    )
    .await;

    assert_eq!(created["first_name"], "Jane");
    assert_eq!(created["email"], "jane@test.com");
    assert!(created["id"].is_i64());
    assert!(created["createdAt"].is_string());
    assert!(created.get("password").is_none());

    let id = created["id"].as_i64().expect("id");
    let fetched: Value = app
        .server
        .get(&format!("/api/v1/user/{id}"))
        .authorization_bearer(&app.token)
        .await
        .json();
    assert!(fetched.get("password").is_none());

    let listed: Value = app
        .server
        .get("/api/v1/users")
        .authorization_bearer(&app.token)
        .await
        .json();
    let users = listed.as_array().expect("array");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password").is_none()));
}

#[tokio::test]
async fn test_new_user_can_log_in() {
    let app = spawn_app().await;

    create(
        &app,
        "/api/v1/user",
        json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@test.com",
            "password": "password123",
            "role_id": 1
        }),
    )
    .await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "jane@test.com", "password": "password123" }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_create_user_validation_error() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/user")
        .authorization_bearer(&app.token)
        .json(&json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@test.com",
            "password": "short",
            "role_id": 1
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().expect("error").contains("password"));
}

#[tokio::test]
async fn test_users_by_store_nest_store() {
    let app = spawn_app().await;
    let (store_id, _, _) = seed_inventory(&app).await;

    create(
        &app,
        "/api/v1/user",
        json!({
            "first_name": "Clerk",
            "last_name": "One",
            "email": "clerk@test.com",
            "password": "password123",
            "role_id": 2,
            "store_id": store_id
        }),
    )
    .await;

    let body: Value = app
        .server
        .get(&format!("/api/v1/users/{store_id}"))
        .authorization_bearer(&app.token)
        .await
        .json();

    let users = body.as_array().expect("array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "clerk@test.com");
    assert_eq!(users[0]["Store"]["name"], "Main Street");
}

#[tokio::test]
async fn test_password_change_flow() {
    let app = spawn_app().await;
    let path = format!("/api/v1/user/password/{}", app.admin_id);

    let wrong = app
        .server
        .patch(&path)
        .authorization_bearer(&app.token)
        .json(&json!({ "password": "notmypass1", "new_password": "newpass123" }))
        .await;
    wrong.assert_status(StatusCode::BAD_REQUEST);
    wrong.assert_json(&json!({ "message": "invalid data" }));

    let changed = app
        .server
        .patch(&path)
        .authorization_bearer(&app.token)
        .json(&json!({ "password": ADMIN_PASSWORD, "new_password": "newpass123" }))
        .await;
    changed.assert_status_ok();
    changed.assert_text("Password updated successfully");

    let old_login = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await;
    old_login.assert_status(StatusCode::BAD_REQUEST);

    let new_login = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": "newpass123" }))
        .await;
    new_login.assert_status_ok();
}

#[tokio::test]
async fn test_password_change_for_missing_user() {
    let app = spawn_app().await;

    let response = app
        .server
        .patch("/api/v1/user/password/999")
        .authorization_bearer(&app.token)
        .json(&json!({ "password": ADMIN_PASSWORD, "new_password": "newpass123" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("User not found");
}

// ============= Store Tests =============

#[tokio::test]
async fn test_update_store() {
    let app = spawn_app().await;
    let (store_id, _, _) = seed_inventory(&app).await;

    let response = app
        .server
        .patch(&format!("/api/v1/store/{store_id}"))
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "High Street" }))
        .await;
    response.assert_status_ok();
    response.assert_text("Store updated successfully");

    let store: Value = app
        .server
        .get(&format!("/api/v1/store/{store_id}"))
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(store["name"], "High Street");
    assert_eq!(store["address"], "1 Main Street");
}

#[tokio::test]
async fn test_update_missing_store() {
    let app = spawn_app().await;

    let response = app
        .server
        .patch("/api/v1/store/999")
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "Nowhere" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("Store not found");
}

#[tokio::test]
async fn test_get_missing_product() {
    let app = spawn_app().await;

    let response = app
        .server
        .get("/api/v1/product/42")
        .authorization_bearer(&app.token)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("Product not found");
}

// ============= Stock Tests =============

#[tokio::test]
async fn test_stocks_nest_product_and_store() {
    let app = spawn_app().await;
    let (store_id, product_id, _) = seed_inventory(&app).await;

    for path in [
        "/api/v1/stocks".to_string(),
        format!("/api/v1/stocks/product/{product_id}"),
        format!("/api/v1/stocks/store/{store_id}"),
    ] {
        let body: Value = app
            .server
            .get(&path)
            .authorization_bearer(&app.token)
            .await
            .json();

        let stocks = body.as_array().expect("array");
        assert_eq!(stocks.len(), 1, "{path}");
        assert_eq!(stocks[0]["quantity"], 10);
        assert_eq!(stocks[0]["Product"]["name"], "Widget");
        assert_eq!(stocks[0]["Store"]["name"], "Main Street");
    }

    let empty: Value = app
        .server
        .get("/api/v1/stocks/store/999")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(empty, json!([]));
}

#[tokio::test]
async fn test_stock_without_store_stays_readable() {
    let app = spawn_app().await;
    let (_, product_id, _) = seed_inventory(&app).await;

    let created = create(
        &app,
        "/api/v1/stock",
        json!({ "product_id": product_id, "quantity": 3 }),
    )
    .await;
    let id = created["id"].as_i64().expect("id");

    let fetched = app
        .server
        .get(&format!("/api/v1/stock/{id}"))
        .authorization_bearer(&app.token)
        .await;
    fetched.assert_status_ok();
    let stock: Value = fetched.json();
    assert_eq!(stock["quantity"], 3);
    assert_eq!(stock["Product"]["name"], "Widget");
    assert!(stock.get("Store").is_none());

    let by_product: Value = app
        .server
        .get(&format!("/api/v1/stocks/product/{product_id}"))
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(by_product.as_array().expect("array").len(), 2);

    // The full listing joins on both associations.
    let all: Value = app
        .server
        .get("/api/v1/stocks")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(all.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn test_delete_stock() {
    let app = spawn_app().await;
    let (_, _, stock_id) = seed_inventory(&app).await;
    let path = format!("/api/v1/stock/{stock_id}");

    let response = app.server.delete(&path).authorization_bearer(&app.token).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    let again = app.server.delete(&path).authorization_bearer(&app.token).await;
    again.assert_status(StatusCode::NOT_FOUND);
    again.assert_text("Stock not found");
}

// ============= Role Tests =============

#[tokio::test]
async fn test_role_crud() {
    let app = spawn_app().await;

    let role = create(&app, "/api/v1/role", json!({ "name": "manager" })).await;
    let id = role["id"].as_i64().expect("id");

    let updated = app
        .server
        .patch(&format!("/api/v1/role/{id}"))
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "owner" }))
        .await;
    updated.assert_status_ok();
    updated.assert_text("Role updated successfully");

    let roles: Value = app
        .server
        .get("/api/v1/roles")
        .authorization_bearer(&app.token)
        .await
        .json();
    assert_eq!(roles[0]["name"], "owner");

    app.server
        .delete(&format!("/api/v1/role/{id}"))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/v1/role/{id}"))
        .authorization_bearer(&app.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_role_rejects_long_name() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/role")
        .authorization_bearer(&app.token)
        .json(&json!({ "name": "x".repeat(26) }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

// ============= Malformed Request Tests =============

#[tokio::test]
async fn test_malformed_json_body_is_structured() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/store")
        .authorization_bearer(&app.token)
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Request body must be a valid JSON object" }));
}

#[tokio::test]
async fn test_non_json_content_type_is_structured() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/role")
        .authorization_bearer(&app.token)
        .text("name=manager")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Request body must be a valid JSON object" }));
}

#[tokio::test]
async fn test_malformed_login_body_uses_message_key() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .content_type("application/json")
        .bytes("{".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "message": "Request body must be a valid JSON object" }));
}

#[tokio::test]
async fn test_non_integer_path_id_is_structured() {
    let app = spawn_app().await;

    let response = app
        .server
        .get("/api/v1/store/abc")
        .authorization_bearer(&app.token)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "\"id\" must be an integer" }));

    let response = app
        .server
        .patch("/api/v1/stock/1.5")
        .authorization_bearer(&app.token)
        .json(&json!({ "quantity": 2 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "\"id\" must be an integer" }));
}

// ============= Failure Tests =============

#[tokio::test]
async fn test_store_failure_returns_500() {
    let state = test_state(Arc::new(FailingStore));
    let token = state.tokens.issue(1).expect("token");
    let server = test_server(state);

    let response = server.get("/api/v1/products").authorization_bearer(&token).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Internal server error" }));
}
