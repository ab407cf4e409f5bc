//! NodeRepository and NodeLookup implementations for SqliteStore.

use super::SqliteStore;
use crate::domain::{Level, Node, NodeId, Position, Slug};
use crate::store::repository::parent_via_lookup;
use crate::store::{NodeLookup, NodeRepository, StoreError, StoreResult};
use rusqlite::{Params, Row};

/// Columns selected for every node query, in `NodeRow` order.
const NODE_COLUMNS: &str = "id, slug, title, sort_order, is_active, parent_id";

/// Raw column values before domain validation.
struct NodeRow {
    id: String,
    slug: String,
    title: String,
    order: i64,
    is_active: bool,
    parent_id: Option<String>,
}

impl NodeRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            slug: row.get(1)?,
            title: row.get(2)?,
            order: row.get(3)?,
            is_active: row.get(4)?,
            parent_id: row.get(5)?,
        })
    }

    fn into_node(self) -> StoreResult<Node> {
        let id: NodeId = self
            .id
            .parse()
            .map_err(|e| StoreError::InvalidData(format!("invalid node ID in database: {}", e)))?;
        let slug = Slug::new(&self.slug)
            .map_err(|e| StoreError::InvalidData(format!("invalid slug in database: {}", e)))?;

        let mut builder = Node::builder(id, slug, self.title)
            .order(self.order)
            .active(self.is_active);
        if let Some(parent) = self.parent_id {
            let parent_id: NodeId = parent.parse().map_err(|e| {
                StoreError::InvalidData(format!("invalid parent ID in database: {}", e))
            })?;
            builder = builder.parent(parent_id);
        }
        Ok(builder.build())
    }
}

impl SqliteStore {
    /// Runs a query expected to return at most one node.
    fn query_node(&self, sql: &str, params: impl Params) -> StoreResult<Option<Node>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        match stmt.query_row(params, NodeRow::read) {
            Ok(row) => row.into_node().map(Some),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    /// Runs a query returning any number of nodes.
    fn query_nodes(&self, sql: &str, params: impl Params) -> StoreResult<Vec<Node>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt
            .query_map(params, NodeRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(NodeRow::into_node).collect()
    }

    fn active_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
        direction: &str,
    ) -> StoreResult<Option<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM {} WHERE parent_id = ?1 AND is_active = 1
             ORDER BY sort_order {direction}, id {direction} LIMIT 1",
            child_level.table()
        );
        self.query_node(&sql, [parent_id.to_string()])
    }
}

impl NodeRepository for SqliteStore {
    fn first_active_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
    ) -> StoreResult<Option<Node>> {
        self.active_child(parent_id, child_level, "ASC")
    }

    fn last_active_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
    ) -> StoreResult<Option<Node>> {
        self.active_child(parent_id, child_level, "DESC")
    }

    fn next_active_sibling(
        &self,
        parent_id: &NodeId,
        level: Level,
        after: &Position,
    ) -> StoreResult<Option<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM {} WHERE parent_id = ?1 AND is_active = 1
               AND (sort_order > ?2 OR (sort_order = ?2 AND id > ?3))
             ORDER BY sort_order ASC, id ASC LIMIT 1",
            level.table()
        );
        self.query_node(
            &sql,
            rusqlite::params![parent_id.to_string(), after.order(), after.id().to_string()],
        )
    }

    fn prev_active_sibling(
        &self,
        parent_id: &NodeId,
        level: Level,
        before: &Position,
    ) -> StoreResult<Option<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM {} WHERE parent_id = ?1 AND is_active = 1
               AND (sort_order < ?2 OR (sort_order = ?2 AND id < ?3))
             ORDER BY sort_order DESC, id DESC LIMIT 1",
            level.table()
        );
        self.query_node(
            &sql,
            rusqlite::params![parent_id.to_string(), before.order(), before.id().to_string()],
        )
    }

    fn parent(&self, node: &Node, level: Level) -> StoreResult<Option<(Node, Level)>> {
        parent_via_lookup(self, node, level)
    }
}

impl NodeLookup for SqliteStore {
    fn get_node(&self, level: Level, id: &NodeId) -> StoreResult<Option<Node>> {
        let sql = format!("SELECT {NODE_COLUMNS} FROM {} WHERE id = ?1", level.table());
        self.query_node(&sql, [id.to_string()])
    }

    fn find_exam(&self, slug: &Slug) -> StoreResult<Option<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM {} WHERE slug = ?1",
            Level::Exam.table()
        );
        self.query_node(&sql, [slug.as_str()])
    }

    fn find_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
        slug: &Slug,
    ) -> StoreResult<Option<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM {} WHERE parent_id = ?1 AND slug = ?2",
            child_level.table()
        );
        self.query_node(&sql, [parent_id.to_string(), slug.to_string()])
    }

    fn exams(&self) -> StoreResult<Vec<Node>> {
        let sql = format!(
            "SELECT {NODE_COLUMNS} FROM {} ORDER BY sort_order ASC, id ASC",
            Level::Exam.table()
        );
        self.query_nodes(&sql, [])
    }
}
