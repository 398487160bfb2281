use crate::db::schema::{self, CREATED_AT, ID, Table, UPDATED_AT};
use crate::db::traits::{Eager, Filter, Record, RecordStore, eager_load};
use crate::types::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct TableData {
    last_id: i64,
    rows: BTreeMap<i64, Record>,
}

/// In-process [`RecordStore`] backed by ordered maps.
///
/// Ids are assigned sequentially per table and never reused. Used by the
/// integration tests and by `database.backend = "memory"`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, TableData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matching(&self, table: &'static Table, filter: &Filter) -> Result<Vec<Record>> {
        for (column, _) in filter.conditions() {
            table.ensure_column(column)?;
        }

        let tables = self.tables.read();
        Ok(tables
            .get(table.name)
            .map(|data| {
                data.rows
                    .values()
                    .filter(|row| filter.matches(row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_all(&self, table: &'static Table, filter: &Filter) -> Result<Vec<Record>> {
        let rows = self.matching(table, filter)?;
        if filter.includes() {
            eager_load(self, table, rows, filter.eager()).await
        } else {
            Ok(rows)
        }
    }

    async fn find_by_pk(&self, table: &'static Table, id: i64) -> Result<Option<Record>> {
        let tables = self.tables.read();
        Ok(tables
            .get(table.name)
            .and_then(|data| data.rows.get(&id))
            .cloned())
    }

    async fn find_one(&self, table: &'static Table, filter: &Filter) -> Result<Option<Record>> {
        Ok(self.find_all(table, filter).await?.into_iter().next())
    }

    async fn create(&self, table: &'static Table, fields: Record) -> Result<Record> {
        for column in fields.keys() {
            table.ensure_column(column)?;
        }

        let now = schema::timestamp();
        let mut row = Record::new();
        for column in table.all_columns() {
            row.insert(
                column.to_string(),
                fields.get(column).cloned().unwrap_or(Value::Null),
            );
        }
        row.insert(CREATED_AT.to_string(), now.clone());
        row.insert(UPDATED_AT.to_string(), now);

        let mut tables = self.tables.write();
        let data = tables.entry(table.name).or_default();
        data.last_id += 1;
        let id = data.last_id;
        row.insert(ID.to_string(), Value::from(id));
        data.rows.insert(id, row.clone());

        Ok(row)
    }

    async fn update(&self, table: &'static Table, fields: Record, filter: &Filter) -> Result<u64> {
        for column in fields.keys() {
            table.ensure_column(column)?;
        }
        for (column, _) in filter.conditions() {
            table.ensure_column(column)?;
        }

        let now = schema::timestamp();
        let mut tables = self.tables.write();
        let Some(data) = tables.get_mut(table.name) else {
            return Ok(0);
        };

        let mut affected = 0;
        for row in data.rows.values_mut().filter(|row| filter.matches(row)) {
            for (column, value) in &fields {
                if column != ID && column != CREATED_AT {
                    row.insert(column.clone(), value.clone());
                }
            }
            row.insert(UPDATED_AT.to_string(), now.clone());
            affected += 1;
        }

        Ok(affected)
    }

    async fn destroy(&self, table: &'static Table, filter: &Filter) -> Result<u64> {
        for (column, _) in filter.conditions() {
            table.ensure_column(column)?;
        }

        let mut tables = self.tables.write();
        let Some(data) = tables.get_mut(table.name) else {
            return Ok(0);
        };

        let before = data.rows.len();
        data.rows.retain(|_, row| !filter.matches(row));
        Ok((before - data.rows.len()) as u64)
    }
}
