//! Declarative table definitions.
//!
//! Each [`Table`] lists its columns (besides the implicit `id`, `createdAt`
//! and `updatedAt`) and the associations that are eager-loaded when a query
//! asks for includes. Stores build their SQL and validate column names from
//! these definitions; handlers never spell out joins.

use crate::types::{AppError, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::fmt;

/// Primary key column present on every table.
pub const ID: &str = "id";
/// Creation timestamp column maintained by the store.
pub const CREATED_AT: &str = "createdAt";
/// Last-update timestamp column maintained by the store.
pub const UPDATED_AT: &str = "updatedAt";

/// Current time in the stored timestamp format (RFC 3339, millisecond, `Z`).
pub fn timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    pub fn sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
}

const fn column(name: &'static str, ty: ColumnType, nullable: bool) -> Column {
    Column { name, ty, nullable }
}

/// A belongs-to association resolved through `foreign_key`.
pub struct Include {
    /// Key under which the associated record is nested (the model name)
    pub alias: &'static str,
    pub table: &'static Table,
    pub foreign_key: &'static str,
    /// Inner-join semantics: drop the row when the association is missing.
    pub required: bool,
}

impl fmt::Debug for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Include")
            .field("alias", &self.alias)
            .field("table", &self.table.name)
            .field("foreign_key", &self.foreign_key)
            .field("required", &self.required)
            .finish()
    }
}

#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub includes: &'static [Include],
}

impl Table {
    /// Whether `name` is a column of this table, implicit columns included.
    pub fn has_column(&self, name: &str) -> bool {
        name == ID
            || name == CREATED_AT
            || name == UPDATED_AT
            || self.columns.iter().any(|column| column.name == name)
    }

    /// Rejects names that are not columns, so they never reach generated SQL.
    pub fn ensure_column(&self, name: &str) -> Result<()> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(AppError::Database(format!(
                "Unknown column \"{}\" on {}",
                name, self.name
            )))
        }
    }

    /// Every column in select order: `id`, declared columns, timestamps.
    pub fn all_columns(&self) -> Vec<&'static str> {
        std::iter::once(ID)
            .chain(self.columns.iter().map(|column| column.name))
            .chain([CREATED_AT, UPDATED_AT])
            .collect()
    }
}

pub static ROLES: Table = Table {
    name: "roles",
    columns: &[column("name", ColumnType::Text, false)],
    includes: &[],
};

pub static STORES: Table = Table {
    name: "stores",
    columns: &[
        column("name", ColumnType::Text, false),
        column("address", ColumnType::Text, false),
        column("owner_id", ColumnType::Integer, true),
    ],
    includes: &[],
};

pub static USERS: Table = Table {
    name: "users",
    columns: &[
        column("first_name", ColumnType::Text, false),
        column("last_name", ColumnType::Text, false),
        column("email", ColumnType::Text, false),
        column("password", ColumnType::Text, false),
        column("role_id", ColumnType::Integer, true),
        column("store_id", ColumnType::Integer, true),
    ],
    includes: &[Include {
        alias: "Store",
        table: &STORES,
        foreign_key: "store_id",
        required: false,
    }],
};

pub static PRODUCTS: Table = Table {
    name: "products",
    columns: &[
        column("name", ColumnType::Text, false),
        column("description", ColumnType::Text, false),
        column("price", ColumnType::Integer, false),
        column("stock_id", ColumnType::Integer, true),
        column("store_id", ColumnType::Integer, true),
    ],
    includes: &[],
};

pub static STOCKS: Table = Table {
    name: "stocks",
    columns: &[
        column("product_id", ColumnType::Integer, false),
        column("store_id", ColumnType::Integer, true),
        column("quantity", ColumnType::Integer, false),
    ],
    includes: &[
        Include {
            alias: "Product",
            table: &PRODUCTS,
            foreign_key: "product_id",
            required: true,
        },
        Include {
            alias: "Store",
            table: &STORES,
            foreign_key: "store_id",
            required: true,
        },
    ],
};

/// Every table, in creation order.
pub static TABLES: [&Table; 5] = [&ROLES, &STORES, &USERS, &PRODUCTS, &STOCKS];
