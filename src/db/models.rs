use crate::db::schema::{self, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

/// A record type persisted in one table.
pub trait Model: DeserializeOwned + Send + 'static {
    /// Display name used in responses ("Store not found") and as the
    /// nesting key when eager-loaded.
    const NAME: &'static str;

    fn table() -> &'static Table;

    fn not_found() -> String {
        format!("{} not found", Self::NAME)
    }

    fn updated() -> String {
        format!("{} updated successfully", Self::NAME)
    }
}

// ============= Roles =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Model for Role {
    const NAME: &'static str = "Role";

    fn table() -> &'static Table {
        &schema::ROLES
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewRole {
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct RoleChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ============= Stores =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub owner_id: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Model for Store {
    const NAME: &'static str = "Store";

    fn table() -> &'static Table {
        &schema::STORES
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewStore {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct StoreChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

// ============= Users =============

/// A user as exposed over the API. The password digest is not a field, so
/// it cannot leak through any read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: Option<i64>,
    pub store_id: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "Store", default, skip_serializing_if = "Option::is_none")]
    pub store: Option<Store>,
}

impl Model for User {
    const NAME: &'static str = "User";

    fn table() -> &'static Table {
        &schema::USERS
    }
}

/// The slice of a user row needed to check a password.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCredentials {
    pub id: i64,
    pub password: String,
}

impl Model for UserCredentials {
    const NAME: &'static str = "User";

    fn table() -> &'static Table {
        &schema::USERS
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
}

// ============= Products =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock_id: Option<i64>,
    pub store_id: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Model for Product {
    const NAME: &'static str = "Product";

    fn table() -> &'static Table {
        &schema::PRODUCTS
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock_id: i64,
    pub store_id: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
}

// ============= Stocks =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stock {
    pub id: i64,
    pub product_id: i64,
    pub store_id: Option<i64>,
    pub quantity: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "Product", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(rename = "Store", default, skip_serializing_if = "Option::is_none")]
    pub store: Option<Store>,
}

impl Model for Stock {
    const NAME: &'static str = "Stock";

    fn table() -> &'static Table {
        &schema::STOCKS
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewStock {
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    pub quantity: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct StockChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}
