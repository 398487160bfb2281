//! Shared fixtures for the integration tests.
//!
//! Builds the full router over an in-memory store with cheap Argon2
//! parameters, and seeds one account to log in with.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use stockroom::{
    AppError, AppState, Result,
    api::routes::create_router,
    db::{
        MemoryStore, Record, RecordStore,
        models::{NewUser, User},
        schema::Table,
        traits::Filter,
    },
    utils::toml_config::StockroomConfig,
};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const ADMIN_PASSWORD: &str = "password123";

/// A running app plus a token for the seeded account.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub token: String,
    pub admin_id: i64,
}

/// Default configuration with the smallest Argon2 cost the crate accepts.
pub fn test_config() -> StockroomConfig {
    let mut config = StockroomConfig::default();
    config.auth.hash_memory_kib = 8;
    config.auth.hash_iterations = 1;
    config.auth.hash_parallelism = 1;
    config
}

pub fn test_state(store: Arc<dyn RecordStore>) -> AppState {
    AppState::new(test_config(), store, TEST_SECRET).expect("Failed to build app state")
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// App over a fresh [`MemoryStore`] with one seeded account.
pub async fn spawn_app() -> TestApp {
    let state = test_state(Arc::new(MemoryStore::new()));

    let digest = state
        .hasher
        .hash_async(ADMIN_PASSWORD)
        .await
        .expect("Failed to hash seed password");
    let admin = state
        .repo::<User>()
        .create(&NewUser {
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: digest,
            role_id: 1,
            store_id: None,
        })
        .await
        .expect("Failed to seed admin");

    let token = state.tokens.issue(admin.id).expect("Failed to issue token");

    TestApp {
        server: test_server(state.clone()),
        state,
        token,
        admin_id: admin.id,
    }
}

/// Record store whose every call fails, for exercising the 500 path.
pub struct FailingStore;

fn unavailable() -> AppError {
    AppError::Database("database is unavailable".to_string())
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn find_all(&self, _table: &'static Table, _filter: &Filter) -> Result<Vec<Record>> {
        Err(unavailable())
    }

    async fn find_by_pk(&self, _table: &'static Table, _id: i64) -> Result<Option<Record>> {
        Err(unavailable())
    }

    async fn find_one(&self, _table: &'static Table, _filter: &Filter) -> Result<Option<Record>> {
        Err(unavailable())
    }

    async fn create(&self, _table: &'static Table, _fields: Record) -> Result<Record> {
        Err(unavailable())
    }

    async fn update(
        &self,
        _table: &'static Table,
        _fields: Record,
        _filter: &Filter,
    ) -> Result<u64> {
        Err(unavailable())
    }

    async fn destroy(&self, _table: &'static Table, _filter: &Filter) -> Result<u64> {
        Err(unavailable())
    }
}
