//! Typed access on top of a [`RecordStore`].
//!
//! `Repository<M>` converts between loose [`Record`]s and the model types in
//! [`models`](super::models), so handlers deal in `Store`/`Stock` values and
//! never touch column maps.

use crate::db::models::Model;
use crate::db::traits::{Filter, Record, RecordStore};
use crate::types::{AppError, Result};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Repository<M> {
    store: Arc<dyn RecordStore>,
    _model: PhantomData<fn() -> M>,
}

impl<M> Clone for Repository<M> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _model: PhantomData,
        }
    }
}

impl<M: Model> Repository<M> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            _model: PhantomData,
        }
    }

    /// Every matching row joined with its declared associations; rows
    /// missing a required association are left out.
    pub async fn list(&self, filter: Filter) -> Result<Vec<M>> {
        self.fetch_all(filter.with_includes()).await
    }

    /// Every matching row, associations nested where they exist.
    pub async fn list_nested(&self, filter: Filter) -> Result<Vec<M>> {
        self.fetch_all(filter.with_nested_includes()).await
    }

    /// One row by primary key, associations nested where they exist.
    pub async fn find(&self, id: i64) -> Result<Option<M>> {
        self.find_one(Filter::by_id(id)).await
    }

    pub async fn find_one(&self, filter: Filter) -> Result<Option<M>> {
        self.store
            .find_one(M::table(), &filter.with_nested_includes())
            .await?
            .map(decode)
            .transpose()
    }

    async fn fetch_all(&self, filter: Filter) -> Result<Vec<M>> {
        self.store
            .find_all(M::table(), &filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Inserts `payload` and returns the stored row.
    pub async fn create<P: Serialize>(&self, payload: &P) -> Result<M> {
        let record = self.store.create(M::table(), encode(payload)?).await?;
        decode(record)
    }

    /// Applies `changes` to row `id`; `false` when no row was affected.
    pub async fn update<P: Serialize>(&self, id: i64, changes: &P) -> Result<bool> {
        let affected = self
            .store
            .update(M::table(), encode(changes)?, &Filter::by_id(id))
            .await?;
        Ok(affected > 0)
    }

    /// Deletes row `id`; `false` when no row was affected.
    pub async fn destroy(&self, id: i64) -> Result<bool> {
        let affected = self.store.destroy(M::table(), &Filter::by_id(id)).await?;
        Ok(affected > 0)
    }
}

fn encode<P: Serialize>(payload: &P) -> Result<Record> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(AppError::Internal(format!(
            "Payload must serialize to an object, got {}",
            other
        ))),
        Err(e) => Err(AppError::Internal(format!("Failed to encode payload: {}", e))),
    }
}

fn decode<M: Model>(record: Record) -> Result<M> {
    serde_json::from_value(Value::Object(record)).map_err(|e| {
        AppError::Database(format!("Failed to decode {} row: {}", M::table().name, e))
    })
}
