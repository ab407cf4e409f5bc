//! SQLite-backed node store.

mod connection;
mod repo_impl;
mod schema;
mod transaction;
mod write;


use rusqlite::Connection;

pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use transaction::Batch;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed content store.
///
/// Each level lives in its own table, named by the level descriptor, with
/// a foreign key to the parent level's table.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
