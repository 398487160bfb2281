//! Persistence abstraction
//!
//! This module provides the `RecordStore` trait: the six record operations
//! the API needs from a backend. Records are JSON objects keyed by column
//! name, so one implementation serves every table declared in
//! [`schema`](super::schema).
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom::db::{Filter, MemoryStore, RecordStore, schema};
//!
//! let store = MemoryStore::new();
//! let created = store.create(&schema::ROLES, record).await?;
//! let affected = store.destroy(&schema::ROLES, &Filter::by_id(1)).await?;
//! ```

use crate::db::schema::{ID, Table};
use crate::types::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One row, keyed by column name.
pub type Record = Map<String, Value>;

/// How a read treats the table's declared associations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Eager {
    #[default]
    Off,
    /// Nest associations; rows missing a required one are dropped.
    Join,
    /// Nest associations, `null` when missing; no row is dropped.
    Nest,
}

/// Equality conditions plus an eager-loading mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(&'static str, Value)>,
    eager: Eager,
}

impl Filter {
    /// Matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the row with the given primary key.
    pub fn by_id(id: i64) -> Self {
        Self::eq(ID, id)
    }

    /// Matches rows where `column` equals `value`.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::all().and(column, value)
    }

    /// Adds another equality condition.
    pub fn and(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    /// Nests the table's declared associations, honoring `required`.
    pub fn with_includes(mut self) -> Self {
        self.eager = Eager::Join;
        self
    }

    /// Nests the declared associations without ever dropping a row.
    pub fn with_nested_includes(mut self) -> Self {
        self.eager = Eager::Nest;
        self
    }

    pub fn conditions(&self) -> &[(&'static str, Value)] {
        &self.conditions
    }

    pub fn includes(&self) -> bool {
        self.eager != Eager::Off
    }

    pub fn eager(&self) -> Eager {
        self.eager
    }

    /// Whether a record satisfies every condition.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|(column, expected)| {
            record.get(*column).unwrap_or(&Value::Null) == expected
        })
    }
}

/// Record-level persistence collaborator.
///
/// Implementations own atomicity of single operations; callers add no
/// locking, retries or transactions on top.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All rows matching `filter`, ordered by primary key.
    async fn find_all(&self, table: &'static Table, filter: &Filter) -> Result<Vec<Record>>;

    async fn find_by_pk(&self, table: &'static Table, id: i64) -> Result<Option<Record>>;

    /// First row matching `filter`, by primary key.
    async fn find_one(&self, table: &'static Table, filter: &Filter) -> Result<Option<Record>>;

    /// Inserts a row and returns it with `id` and timestamps filled in.
    async fn create(&self, table: &'static Table, fields: Record) -> Result<Record>;

    /// Applies `fields` to every matching row; returns the affected count.
    async fn update(&self, table: &'static Table, fields: Record, filter: &Filter) -> Result<u64>;

    /// Deletes every matching row; returns the affected count.
    async fn destroy(&self, table: &'static Table, filter: &Filter) -> Result<u64>;
}

/// Nests each association declared on `table` into `rows` under its alias.
///
/// Under [`Eager::Join`] rows whose required association is missing are
/// dropped. Any other missing association is nested as `null`.
pub async fn eager_load<S: RecordStore + ?Sized>(
    store: &S,
    table: &'static Table,
    rows: Vec<Record>,
    eager: Eager,
) -> Result<Vec<Record>> {
    if eager == Eager::Off || table.includes.is_empty() {
        return Ok(rows);
    }

    let mut loaded = Vec::with_capacity(rows.len());
    'rows: for mut row in rows {
        for include in table.includes {
            let associated = match row.get(include.foreign_key).and_then(Value::as_i64) {
                Some(id) => store.find_by_pk(include.table, id).await?,
                None => None,
            };

            match associated {
                Some(record) => {
                    row.insert(include.alias.to_string(), Value::Object(record));
                }
                None if include.required && eager == Eager::Join => continue 'rows,
                None => {
                    row.insert(include.alias.to_string(), Value::Null);
                }
            }
        }
        loaded.push(row);
    }

    Ok(loaded)
}
