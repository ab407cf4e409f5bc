//! Write operations used by the loader and the activation commands.

use super::SqliteStore;
use crate::domain::{Level, Node, NodeId};
use crate::store::{NodeLookup, StoreError, StoreResult};

/// Inserts one node, checking the constraints the schema would otherwise
/// report as opaque SQLite errors.
pub(super) fn insert_row(store: &SqliteStore, level: Level, node: &Node) -> StoreResult<()> {
    if let Some(parent_id) = node.parent_id() {
        let parent_level = level.parent().ok_or_else(|| {
            StoreError::InvalidData(format!("exam '{}' cannot have a parent", node.slug()))
        })?;
        if store.get_node(parent_level, parent_id)?.is_none() {
            return Err(StoreError::MissingParent {
                level,
                slug: node.slug().clone(),
                parent_id: parent_id.clone(),
            });
        }
        if store.find_child(parent_id, level, node.slug())?.is_some() {
            return Err(StoreError::DuplicateSlug {
                level,
                slug: node.slug().clone(),
            });
        }
    } else if level != Level::Exam {
        return Err(StoreError::InvalidData(format!(
            "{} '{}' has no parent",
            level,
            node.slug()
        )));
    } else if store.find_exam(node.slug())?.is_some() {
        return Err(StoreError::DuplicateSlug {
            level,
            slug: node.slug().clone(),
        });
    }

    if store.contains(node.id())? {
        return Err(StoreError::DuplicateId {
            id: node.id().clone(),
        });
    }

    store.conn.execute(
        &format!(
            "INSERT INTO {} (id, parent_id, slug, title, sort_order, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            level.table()
        ),
        rusqlite::params![
            node.id().to_string(),
            node.parent_id().map(|p| p.to_string()),
            node.slug().as_str(),
            node.title(),
            node.order(),
            node.is_active(),
        ],
    )?;
    Ok(())
}

/// Deletes every exam; the foreign keys cascade through the other levels.
pub(super) fn delete_all(store: &SqliteStore) -> StoreResult<()> {
    store
        .conn
        .execute(&format!("DELETE FROM {}", Level::Exam.table()), [])?;
    Ok(())
}

impl SqliteStore {
    /// Inserts a single node at `level`.
    pub fn insert_node(&mut self, level: Level, node: &Node) -> StoreResult<()> {
        insert_row(self, level, node)
    }

    /// Inserts many nodes atomically, parents before children.
    ///
    /// With `replace`, existing content is removed first in the same
    /// transaction. Returns the number of nodes written.
    pub fn load_nodes(&mut self, nodes: &[(Level, Node)], replace: bool) -> StoreResult<usize> {
        let mut batch = self.batch()?;
        if replace {
            batch.clear()?;
        }
        for (level, node) in nodes {
            batch.insert(*level, node)?;
        }
        let count = batch.commit()?;
        tracing::info!(count, replace, "loaded nodes");
        Ok(count)
    }

    /// Removes every node.
    pub fn clear(&mut self) -> StoreResult<()> {
        delete_all(self)
    }

    /// Sets a node's activity flag.
    ///
    /// Returns `true` if a node was updated, `false` if none has that id.
    pub fn set_active(&mut self, level: Level, id: &NodeId, is_active: bool) -> StoreResult<bool> {
        let rows = self.conn.execute(
            &format!("UPDATE {} SET is_active = ?1 WHERE id = ?2", level.table()),
            rusqlite::params![is_active, id.to_string()],
        )?;
        Ok(rows > 0)
    }

    /// Returns whether any level holds a node with this id.
    pub fn contains(&self, id: &NodeId) -> StoreResult<bool> {
        for level in Level::ALL {
            if self.get_node(level, id)?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns the number of nodes per level, root first.
    pub fn count_by_level(&self) -> StoreResult<Vec<(Level, u64)>> {
        Level::ALL
            .into_iter()
            .map(|level| {
                let count: i64 = self.conn.query_row(
                    &format!("SELECT COUNT(*) FROM {}", level.table()),
                    [],
                    |row| row.get(0),
                )?;
                Ok((level, count as u64))
            })
            .collect()
    }
}
