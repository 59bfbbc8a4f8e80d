//! Database module: the local record store.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for the base tables and the evolved column list
//! - `migrate.rs`: `SchemaManager`, which applies both idempotently
//! - `models.rs`: Rust structs mirroring DB rows
//! - `sqlite.rs`: `RecordStore`, the connection handle and issue/wiki operations

pub mod migrate;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use migrate::SchemaManager;
pub use models::{DbUser, Issue, IssueFields, WikiPage};
pub use schema::{EVOLVED_COLUMNS, SQLITE_INIT};
pub use sqlite::{RecordStore, SqlitePool};
