//! Opening a SqliteStore.

use super::SqliteStore;
use super::schema::{SCHEMA_VERSION, create_schema, get_schema_version};
use super::transaction::Batch;
use crate::store::{StoreError, StoreResult};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

impl SqliteStore {
    /// Opens a private in-memory store. Used by tests and benchmarks.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Opens or creates the store at `path`, creating missing parent
    /// directories.
    ///
    /// Fails with [`StoreError::UnsupportedSchema`] if the file was written
    /// by a newer schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        tracing::debug!(path = %path.display(), "opening content store");
        Self::init(Connection::open(path)?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        create_schema(&conn)?;
        let found = get_schema_version(&conn)?;
        if found > SCHEMA_VERSION {
            return Err(StoreError::UnsupportedSchema {
                found,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(Self { conn })
    }

    /// Starts an atomic batch of writes.
    pub fn batch(&mut self) -> StoreResult<Batch<'_>> {
        Batch::begin(self)
    }
}
