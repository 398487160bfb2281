//! Payload schemas for every resource.
//!
//! Names are limited to 25 characters, free text and addresses to 255,
//! passwords to 8..=16. Update schemas reuse the create rules with every
//! field optional.

use super::{Field, Schema};

/// Longest accepted name-like value.
pub const NAME_MAX: usize = 25;
/// Longest accepted free-text/address value.
pub const TEXT_MAX: usize = 255;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 16;

const fn password(name: &'static str) -> Field {
    Field::text(name).min(PASSWORD_MIN).max(PASSWORD_MAX)
}

// ============= Auth =============

pub const LOGIN: Schema = Schema::new(&[
    Field::email("email").required(),
    password("password").required(),
]);

// ============= Users =============

pub const CREATE_USER: Schema = Schema::new(&[
    Field::text("first_name").max(NAME_MAX).required(),
    Field::text("last_name").max(NAME_MAX).required(),
    Field::email("email").required(),
    password("password").required(),
    Field::integer("role_id").required(),
    Field::integer("store_id"),
]);

pub const UPDATE_USER: Schema = CREATE_USER.partial();

pub const UPDATE_USER_PASSWORD: Schema = Schema::new(&[
    password("password").required(),
    password("new_password").required(),
]);

// ============= Stores =============

pub const CREATE_STORE: Schema = Schema::new(&[
    Field::text("name").max(NAME_MAX).required(),
    Field::text("address").max(TEXT_MAX).required(),
    Field::integer("owner_id"),
]);

pub const UPDATE_STORE: Schema = CREATE_STORE.partial();

// ============= Products =============

pub const CREATE_PRODUCT: Schema = Schema::new(&[
    Field::text("name").max(NAME_MAX).required(),
    Field::text("description").max(TEXT_MAX).required(),
    Field::integer("price").required(),
    Field::integer("stock_id").required(),
    Field::integer("store_id").required(),
]);

pub const UPDATE_PRODUCT: Schema = CREATE_PRODUCT.partial();

// ============= Stocks =============

pub const CREATE_STOCK: Schema = Schema::new(&[
    Field::integer("product_id").required(),
    Field::integer("store_id"),
    Field::integer("quantity").required(),
]);

pub const UPDATE_STOCK: Schema = CREATE_STOCK.partial();

// ============= Roles =============

pub const CREATE_ROLE: Schema = Schema::new(&[Field::text("name").max(NAME_MAX).required()]);

pub const UPDATE_ROLE: Schema = CREATE_ROLE.partial();
