//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::openapi`](crate::api::openapi) - OpenAPI document and docs routes
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/v1/auth`)
//! - `POST /api/v1/auth/login` - Login and receive a token
//! - `GET /api/v1/auth/validate` - Check the token in `Authorization`
//!
//! ## Resources (`/api/v1`)
//! For each of `user`, `store`, `product`, `stock` and `role`:
//! - `GET /api/v1/<resource>s` - List
//! - `GET /api/v1/<resource>/{id}` - Fetch one
//! - `POST /api/v1/<resource>` - Create
//! - `PATCH /api/v1/<resource>/{id}` - Update
//! - `DELETE /api/v1/<resource>/{id}` - Delete
//!
//! Plus `GET /api/v1/users/{store_id}`, `PATCH /api/v1/user/password/{id}`,
//! `GET /api/v1/stocks/product/{product_id}` and `GET /api/v1/stocks/store/{store_id}`.
//!
//! ## Health
//! - `GET /status` - Liveness probe
//!
//! # Authentication
//!
//! Every route under `/api/v1` except login and validate requires a valid
//! token in the `Authorization` header, raw or with a `Bearer ` prefix:
//! ```text
//! Authorization: Bearer <token>
//! ```

/// Extractors with structured rejections.
pub mod extract;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// OpenAPI document.
pub mod openapi;
/// Router configuration and route definitions.
pub mod routes;
