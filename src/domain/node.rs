//! Content node and its sibling-ordering key.

use super::{NodeId, Slug};
use serde::Serialize;
use std::cmp::Ordering;

/// One content item at some level of the taxonomy.
///
/// A node does not know its own level; the level is supplied by whoever
/// fetched it (a repository query is always level-scoped) or by its index
/// in a [`NodePath`](super::NodePath).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: NodeId,
    slug: Slug,
    title: String,
    order: i64,
    is_active: bool,
    parent_id: Option<NodeId>,
}

impl Node {
    /// Creates a builder for an active, parentless node with order 0.
    pub fn builder(id: NodeId, slug: Slug, title: impl Into<String>) -> NodeBuilder {
        NodeBuilder {
            id,
            slug,
            title: title.into(),
            order: 0,
            is_active: true,
            parent_id: None,
        }
    }

    /// Returns the node's stable identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the node's slug.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Returns the node's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the sibling sequence number.
    pub fn order(&self) -> i64 {
        self.order
    }

    /// Returns whether the node is visible to navigation.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the parent's identifier, `None` for an Exam.
    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    /// Returns the key this node is sorted by among its siblings.
    pub fn position(&self) -> Position {
        Position::new(self.order, self.id.clone())
    }

    /// Returns a copy of this node with a different activity flag.
    pub fn with_active(&self, is_active: bool) -> Node {
        Node {
            is_active,
            ..self.clone()
        }
    }
}

/// Builder for constructing a Node.
pub struct NodeBuilder {
    id: NodeId,
    slug: Slug,
    title: String,
    order: i64,
    is_active: bool,
    parent_id: Option<NodeId>,
}

impl NodeBuilder {
    /// Sets the sibling sequence number.
    pub fn order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Sets the activity flag.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the parent node.
    pub fn parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Builds the Node.
    pub fn build(self) -> Node {
        Node {
            id: self.id,
            slug: self.slug,
            title: self.title,
            order: self.order,
            is_active: self.is_active,
            parent_id: self.parent_id,
        }
    }
}

/// Where a node sits among its siblings: `order` first, then `id`.
///
/// `order` is assumed unique among active siblings but nothing enforces it;
/// the id tie-break keeps every sibling reachable and the sequence
/// deterministic when two siblings share an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    order: i64,
    id: NodeId,
}

impl Position {
    pub fn new(order: i64, id: NodeId) -> Self {
        Self { order, id }
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
