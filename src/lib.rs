//! # Stockroom - multi-store inventory server
//!
//! An HTTP backend exposing CRUD over users, stores, products, stock records
//! and roles, with stateless bearer-token authentication in front of every
//! resource route.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use stockroom::{AppState, api::routes::create_router, db::MemoryStore};
//! use std::sync::Arc;
//!
//! let config = StockroomConfig::default();
//! let state = AppState::new(config, Arc::new(MemoryStore::new()), "secret")?;
//! let app = create_router(state);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers, routes and the OpenAPI document
//! - [`auth`] - password hashing, tokens and the request gate
//! - [`db`] - record store trait, models and the libSQL/in-memory backends
//! - [`validation`] - declarative payload schemas
//! - [`types`] - error taxonomy and shared DTOs
//! - [`utils`] - TOML configuration
//! - [`cli`] - command-line interface
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Serve Swagger UI at `/api-docs` |

#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Password hashing, bearer tokens and the auth gate.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// Record store abstraction and backends.
pub mod db;
/// Error taxonomy and request/response types.
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Payload validation.
pub mod validation;

use crate::auth::{jwt::TokenService, password::CredentialHasher};
use crate::db::models::Model;
use crate::db::{MemoryStore, RecordStore, Repository, TursoStore};
use crate::utils::toml_config::{DatabaseBackend, DatabaseConfig, StockroomConfig};
use std::sync::Arc;

pub use types::{AppError, Result};
pub use utils::toml_config::ConfigError;

/// Process-wide context built once at startup and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StockroomConfig>,
    pub store: Arc<dyn RecordStore>,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<CredentialHasher>,
}

impl AppState {
    /// Wires services from configuration around an already-open store.
    pub fn new(config: StockroomConfig, store: Arc<dyn RecordStore>, secret: &str) -> Result<Self> {
        let hasher = CredentialHasher::new(
            config.auth.hash_memory_kib,
            config.auth.hash_iterations,
            config.auth.hash_parallelism,
        )?;
        let tokens = TokenService::new(secret, config.auth.token_ttl_secs);

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens: Arc::new(tokens),
            hasher: Arc::new(hasher),
        })
    }

    /// Typed repository for model `M` over the shared store.
    pub fn repo<M: Model>(&self) -> Repository<M> {
        Repository::new(Arc::clone(&self.store))
    }
}

/// Opens the record store selected by `database.backend`.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn RecordStore>> {
    match config.backend {
        DatabaseBackend::Sqlite => {
            tracing::info!(url = %config.url, "opening sqlite database");
            Ok(Arc::new(TursoStore::new_local(&config.url).await?))
        }
        DatabaseBackend::Memory => {
            tracing::info!("using in-memory record store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
