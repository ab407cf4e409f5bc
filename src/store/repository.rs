//! NodeRepository and NodeLookup traits and the store error type.

use crate::domain::{Level, Node, NodeId, Position, Slug};
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors that can occur while reading or writing content nodes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database was created by a newer version of the schema.
    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i64, supported: i64 },

    /// Stored data could not be turned back into domain values.
    #[error("invalid stored data: {0}")]
    InvalidData(String),

    /// A node was written under a parent that does not exist.
    #[error("{level} '{slug}' refers to missing parent {parent_id}")]
    MissingParent {
        level: Level,
        slug: Slug,
        parent_id: NodeId,
    },

    /// A sibling already uses this slug.
    #[error("{level} slug '{slug}' is already used by a sibling")]
    DuplicateSlug { level: Level, slug: Slug },

    /// A node with this id already exists.
    #[error("node {id} already exists")]
    DuplicateId { id: NodeId },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// NodeRepository Trait
// ===========================================

/// Read access needed by the navigation resolver.
///
/// "Active" always means the node's own flag; a store never has to look at
/// ancestors because navigation only reaches a node through its active
/// parent. Sibling order is ascending [`Position`] (`order`, then `id`).
pub trait NodeRepository {
    /// Returns the active child of `parent_id` with the least position.
    fn first_active_child(&self, parent_id: &NodeId, child_level: Level)
    -> StoreResult<Option<Node>>;

    /// Returns the active child of `parent_id` with the greatest position.
    fn last_active_child(&self, parent_id: &NodeId, child_level: Level)
    -> StoreResult<Option<Node>>;

    /// Returns the active node under `parent_id` at `level` with the least
    /// position strictly after `after`.
    fn next_active_sibling(
        &self,
        parent_id: &NodeId,
        level: Level,
        after: &Position,
    ) -> StoreResult<Option<Node>>;

    /// Returns the active node under `parent_id` at `level` with the
    /// greatest position strictly before `before`.
    fn prev_active_sibling(
        &self,
        parent_id: &NodeId,
        level: Level,
        before: &Position,
    ) -> StoreResult<Option<Node>>;

    /// Returns the parent of `node` together with its level.
    ///
    /// `None` only when `level` is `Exam`; a dangling parent reference is
    /// reported as [`StoreError::InvalidData`].
    fn parent(&self, node: &Node, level: Level) -> StoreResult<Option<(Node, Level)>>;
}

// ===========================================
// NodeLookup Trait
// ===========================================

/// Lookups used to resolve a slug path or id into a [`NodePath`](crate::domain::NodePath).
///
/// Unlike [`NodeRepository`] these return nodes regardless of their
/// activity flag so callers can tell "missing" from "hidden".
pub trait NodeLookup {
    /// Fetches a node by id at a known level.
    fn get_node(&self, level: Level, id: &NodeId) -> StoreResult<Option<Node>>;

    /// Finds the Exam with the given slug.
    fn find_exam(&self, slug: &Slug) -> StoreResult<Option<Node>>;

    /// Finds the child of `parent_id` at `child_level` with the given slug.
    fn find_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
        slug: &Slug,
    ) -> StoreResult<Option<Node>>;

    /// Lists every Exam, active or not, in position order.
    fn exams(&self) -> StoreResult<Vec<Node>>;
}

/// Resolves the parent of a non-Exam node through [`NodeLookup::get_node`].
///
/// Shared by store implementations so `NodeRepository::parent` behaves
/// identically everywhere.
pub(crate) fn parent_via_lookup<S: NodeLookup + ?Sized>(
    store: &S,
    node: &Node,
    level: Level,
) -> StoreResult<Option<(Node, Level)>> {
    let Some(parent_level) = level.parent() else {
        return Ok(None);
    };
    let parent_id = node.parent_id().ok_or_else(|| {
        StoreError::InvalidData(format!("{} '{}' has no parent", level, node.slug()))
    })?;

    match store.get_node(parent_level, parent_id)? {
        Some(parent) => Ok(Some((parent, parent_level))),
        None => Err(StoreError::InvalidData(format!(
            "{} '{}' refers to missing {} {}",
            level,
            node.slug(),
            parent_level,
            parent_id
        ))),
    }
}
