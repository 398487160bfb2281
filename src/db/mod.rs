//! Persistence: the record store collaborator and its backends.
//!
//! - [`traits`] - the `RecordStore` trait and query `Filter`
//! - [`schema`] - declarative tables and eager-load associations
//! - [`models`] - typed rows and request payloads
//! - [`repository`] - typed facade used by the handlers
//! - [`turso`] - libSQL/SQLite backend
//! - [`memory`] - in-process backend

pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod traits;
pub mod turso;

pub use memory::MemoryStore;
pub use repository::Repository;
pub use traits::{Filter, Record, RecordStore};
pub use turso::TursoStore;
