//! API request handlers.
//!
//! One module per resource. Every mutating handler validates its payload
//! before touching the store; lookups, updates and deletes that hit no row
//! answer 404 with `<Resource> not found`.

/// Login and token validation.
pub mod auth;
/// Liveness probe.
pub mod health;
/// Product CRUD.
pub mod products;
/// Role CRUD.
pub mod roles;
/// Stock CRUD and filtered listings.
pub mod stocks;
/// Store CRUD.
pub mod stores;
/// User CRUD, users by store and password change.
pub mod users;

use crate::db::models::Model;
use crate::types::{AppError, Result};
use crate::AppState;
use axum::http::StatusCode;
use serde::Serialize;

async fn find_or_404<M: Model>(state: &AppState, id: i64) -> Result<M> {
    state
        .repo::<M>()
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(M::not_found()))
}

async fn update_or_404<M: Model, P: Serialize>(state: &AppState, id: i64, changes: &P) -> Result<String> {
    if state.repo::<M>().update(id, changes).await? {
        Ok(M::updated())
    } else {
        Err(AppError::NotFound(M::not_found()))
    }
}

async fn destroy_or_404<M: Model>(state: &AppState, id: i64) -> Result<StatusCode> {
    if state.repo::<M>().destroy(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(M::not_found()))
    }
}
