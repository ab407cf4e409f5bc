//! Atomic write batches.

use super::SqliteStore;
use super::write::{delete_all, insert_row};
use crate::domain::{Level, Node};
use crate::store::StoreResult;

/// A group of writes applied in one SQLite transaction.
///
/// Dropping a batch without calling [`Batch::commit`] rolls every write
/// back, so a failed load leaves the previous content in place.
pub struct Batch<'a> {
    store: &'a SqliteStore,
    written: usize,
    committed: bool,
}

impl<'a> Batch<'a> {
    pub(crate) fn begin(store: &'a SqliteStore) -> StoreResult<Self> {
        store.conn.execute_batch("BEGIN")?;
        Ok(Self {
            store,
            written: 0,
            committed: false,
        })
    }

    /// Deletes every node in the store.
    pub fn clear(&mut self) -> StoreResult<()> {
        delete_all(self.store)
    }

    /// Inserts one node; its parent must already exist or have been
    /// inserted earlier in this batch.
    pub fn insert(&mut self, level: Level, node: &Node) -> StoreResult<()> {
        insert_row(self.store, level, node)?;
        self.written += 1;
        Ok(())
    }

    /// Commits the batch and returns the number of nodes inserted.
    pub fn commit(mut self) -> StoreResult<usize> {
        self.store.conn.execute_batch("COMMIT")?;
        self.committed = true;
        Ok(self.written)
    }
}

impl Drop for Batch<'_> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::warn!(pending = self.written, "rolling back uncommitted batch");
            let _ = self.store.conn.execute_batch("ROLLBACK");
        }
    }
}
