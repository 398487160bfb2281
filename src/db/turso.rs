use crate::db::schema::{self, CREATED_AT, ID, TABLES, Table, UPDATED_AT};
use crate::db::traits::{Eager, Filter, Record, RecordStore, eager_load};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use libsql::params::Params;
use libsql::{Builder, Connection, Database};
use serde_json::{Number, Value};
use std::path::Path;

/// libSQL/SQLite-backed [`RecordStore`].
///
/// Holds one connection for its lifetime: an in-memory database lives and
/// dies with the connection that opened it.
pub struct TursoStore {
    _db: Database,
    conn: Connection,
}

impl TursoStore {
    /// Opens (or creates) the database file at `path`; `:memory:` opens a
    /// private in-memory database.
    pub async fn new_local(path: &str) -> Result<Self> {
        if path != ":memory:"
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Database(format!("Failed to create database directory: {}", e))
            })?;
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let store = Self { _db: db, conn };
        store.initialize_schema().await?;

        Ok(store)
    }

    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    async fn initialize_schema(&self) -> Result<()> {
        for table in TABLES {
            self.conn
                .execute(&create_table_sql(table), ())
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to create {} table: {}", table.name, e))
                })?;
        }

        Ok(())
    }

    async fn select(&self, table: &'static Table, filter: &Filter, limit: Option<u32>) -> Result<Vec<Record>> {
        let columns = table.all_columns();
        let (clause, params) = where_clause(table, filter)?;
        let mut sql = format!(
            "SELECT {} FROM {}{} ORDER BY {}",
            column_list(&columns),
            quote(table.name),
            clause,
            quote(ID)
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut rows = self
            .conn
            .query(&sql, Params::Positional(params))
            .await
            .map_err(|e| AppError::Database(format!("Failed to query {}: {}", table.name, e)))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            let mut record = Record::new();
            for (idx, column) in columns.iter().enumerate() {
                let value = row
                    .get_value(idx as i32)
                    .map_err(|e| AppError::Database(e.to_string()))?;
                record.insert(column.to_string(), from_sql(value));
            }
            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl RecordStore for TursoStore {
    async fn find_all(&self, table: &'static Table, filter: &Filter) -> Result<Vec<Record>> {
        let rows = self.select(table, filter, None).await?;
        if filter.includes() {
            eager_load(self, table, rows, filter.eager()).await
        } else {
            Ok(rows)
        }
    }

    async fn find_by_pk(&self, table: &'static Table, id: i64) -> Result<Option<Record>> {
        Ok(self
            .select(table, &Filter::by_id(id), Some(1))
            .await?
            .into_iter()
            .next())
    }

    async fn find_one(&self, table: &'static Table, filter: &Filter) -> Result<Option<Record>> {
        let joined = filter.eager() == Eager::Join;
        if joined && table.includes.iter().any(|include| include.required) {
            // An inner-joined association can drop rows, so the first
            // surviving row is not necessarily the first selected one.
            return Ok(self.find_all(table, filter).await?.into_iter().next());
        }

        let rows = self.select(table, filter, Some(1)).await?;
        let rows = if filter.includes() {
            eager_load(self, table, rows, filter.eager()).await?
        } else {
            rows
        };
        Ok(rows.into_iter().next())
    }

    async fn create(&self, table: &'static Table, fields: Record) -> Result<Record> {
        let now = schema::timestamp();
        let mut columns = Vec::with_capacity(fields.len() + 2);
        let mut values = Vec::with_capacity(fields.len() + 2);

        for (column, value) in &fields {
            table.ensure_column(column)?;
            if column == ID || column == CREATED_AT || column == UPDATED_AT {
                continue;
            }
            columns.push(column.as_str());
            values.push(to_sql(value));
        }
        columns.extend([CREATED_AT, UPDATED_AT]);
        values.extend([to_sql(&now), to_sql(&now)]);

        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quote(table.name),
            column_list(&columns),
            placeholders,
            quote(ID)
        );

        let mut rows = self
            .conn
            .query(&sql, Params::Positional(values))
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to insert into {}: {}", table.name, e))
            })?;

        let id: i64 = match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            None => {
                return Err(AppError::Database(format!(
                    "Insert into {} returned no id",
                    table.name
                )));
            }
        };
        drop(rows);

        self.find_by_pk(table, id).await?.ok_or_else(|| {
            AppError::Database(format!("Inserted {} row {} vanished", table.name, id))
        })
    }

    async fn update(&self, table: &'static Table, fields: Record, filter: &Filter) -> Result<u64> {
        let mut assignments = Vec::with_capacity(fields.len() + 1);
        let mut values = Vec::with_capacity(fields.len() + 1);

        for (column, value) in &fields {
            table.ensure_column(column)?;
            if column == ID || column == CREATED_AT || column == UPDATED_AT {
                continue;
            }
            assignments.push(format!("{} = ?", quote(column)));
            values.push(to_sql(value));
        }
        assignments.push(format!("{} = ?", quote(UPDATED_AT)));
        values.push(to_sql(&schema::timestamp()));

        let (clause, params) = where_clause(table, filter)?;
        values.extend(params);

        let sql = format!(
            "UPDATE {} SET {}{}",
            quote(table.name),
            assignments.join(", "),
            clause
        );

        self.conn
            .execute(&sql, Params::Positional(values))
            .await
            .map_err(|e| AppError::Database(format!("Failed to update {}: {}", table.name, e)))
    }

    async fn destroy(&self, table: &'static Table, filter: &Filter) -> Result<u64> {
        let (clause, params) = where_clause(table, filter)?;
        let sql = format!("DELETE FROM {}{}", quote(table.name), clause);

        self.conn
            .execute(&sql, Params::Positional(params))
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to delete from {}: {}", table.name, e))
            })
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", ")
}

fn create_table_sql(table: &Table) -> String {
    let mut definitions = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote(ID))];
    for column in table.columns {
        let null = if column.nullable { "" } else { " NOT NULL" };
        definitions.push(format!("{} {}{}", quote(column.name), column.ty.sql(), null));
    }
    definitions.push(format!("{} TEXT NOT NULL", quote(CREATED_AT)));
    definitions.push(format!("{} TEXT NOT NULL", quote(UPDATED_AT)));

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(table.name),
        definitions.join(", ")
    )
}

/// ` WHERE a = ? AND b IS NULL` plus its positional parameters.
fn where_clause(table: &Table, filter: &Filter) -> Result<(String, Vec<libsql::Value>)> {
    let mut predicates = Vec::new();
    let mut values = Vec::new();

    for (column, value) in filter.conditions() {
        table.ensure_column(column)?;
        if value.is_null() {
            predicates.push(format!("{} IS NULL", quote(column)));
        } else {
            predicates.push(format!("{} = ?", quote(column)));
            values.push(to_sql(value));
        }
    }

    let clause = if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    };

    Ok((clause, values))
}

fn to_sql(value: &Value) -> libsql::Value {
    match value {
        Value::Null => libsql::Value::Null,
        Value::Bool(flag) => libsql::Value::Integer(i64::from(*flag)),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => libsql::Value::Integer(integer),
            None => libsql::Value::Real(number.as_f64().unwrap_or_default()),
        },
        Value::String(text) => libsql::Value::Text(text.clone()),
        other => libsql::Value::Text(other.to_string()),
    }
}

fn from_sql(value: libsql::Value) -> Value {
    match value {
        libsql::Value::Null => Value::Null,
        libsql::Value::Integer(integer) => Value::from(integer),
        libsql::Value::Real(real) => Number::from_f64(real).map_or(Value::Null, Value::Number),
        libsql::Value::Text(text) => Value::String(text),
        libsql::Value::Blob(bytes) => Value::from(bytes),
    }
}
