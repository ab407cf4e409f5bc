//! In-process node store.

use super::repository::{NodeLookup, NodeRepository, StoreError, StoreResult, parent_via_lookup};
use crate::domain::{Level, Node, NodeId, Position, Slug};
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

/// Nodes of one level, with a per-parent sibling index.
#[derive(Debug, Default, Clone)]
struct LevelTable {
    nodes: HashMap<NodeId, Node>,
    siblings: HashMap<Option<NodeId>, BTreeSet<Position>>,
}

impl LevelTable {
    fn ordered<'a>(
        &'a self,
        parent_id: Option<&NodeId>,
    ) -> impl DoubleEndedIterator<Item = &'a Node> + 'a {
        self.siblings
            .get(&parent_id.cloned())
            .into_iter()
            .flat_map(|set| set.iter())
            .filter_map(move |pos| self.nodes.get(pos.id()))
    }

    fn first_active(&self, parent_id: &NodeId) -> Option<Node> {
        self.ordered(Some(parent_id)).find(|n| n.is_active()).cloned()
    }

    fn last_active(&self, parent_id: &NodeId) -> Option<Node> {
        self.ordered(Some(parent_id))
            .rev()
            .find(|n| n.is_active())
            .cloned()
    }

    fn range_active(
        &self,
        parent_id: &NodeId,
        bounds: (Bound<&Position>, Bound<&Position>),
        reverse: bool,
    ) -> Option<Node> {
        let set = self.siblings.get(&Some(parent_id.clone()))?;
        let mut range = set.range::<Position, _>(bounds);
        let mut active = |pos: &Position| {
            self.nodes
                .get(pos.id())
                .filter(|n| n.is_active())
                .cloned()
        };
        if reverse {
            range.rev().find_map(&mut active)
        } else {
            range.find_map(&mut active)
        }
    }
}

/// A node store held entirely in memory.
///
/// Orders siblings exactly like the SQLite store, so tests and benchmarks
/// written against it describe production behaviour.
///
/// # Examples
///
/// ```
/// use syllabus::domain::{Level, Node, NodeId, Slug};
/// use syllabus::store::{MemoryStore, NodeRepository};
///
/// let mut store = MemoryStore::new();
/// let exam = Node::builder(NodeId::from_u128(1), Slug::new("neet").unwrap(), "NEET").build();
/// let physics = Node::builder(NodeId::from_u128(2), Slug::new("physics").unwrap(), "Physics")
///     .parent(exam.id().clone())
///     .order(1)
///     .build();
/// store.insert(Level::Exam, exam.clone()).unwrap();
/// store.insert(Level::Subject, physics.clone()).unwrap();
///
/// let first = store.first_active_child(exam.id(), Level::Subject).unwrap();
/// assert_eq!(first, Some(physics));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    levels: Vec<LevelTable>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            levels: vec![LevelTable::default(); Level::COUNT],
        }
    }

    /// Creates a store from `(level, node)` pairs, parents first.
    pub fn from_nodes<I>(nodes: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = (Level, Node)>,
    {
        let mut store = Self::new();
        for (level, node) in nodes {
            store.insert(level, node)?;
        }
        Ok(store)
    }

    fn table(&self, level: Level) -> &LevelTable {
        &self.levels[level.rank()]
    }

    /// Inserts a node at `level`.
    ///
    /// The parent must already be present at the parent level, the id must
    /// be new, and the slug must be unused among the node's siblings.
    pub fn insert(&mut self, level: Level, node: Node) -> StoreResult<()> {
        if self.levels.iter().any(|t| t.nodes.contains_key(node.id())) {
            return Err(StoreError::DuplicateId {
                id: node.id().clone(),
            });
        }

        match (level.parent(), node.parent_id()) {
            (None, None) => {}
            (None, Some(_)) => {
                return Err(StoreError::InvalidData(format!(
                    "exam '{}' cannot have a parent",
                    node.slug()
                )));
            }
            (Some(_), None) => {
                return Err(StoreError::InvalidData(format!(
                    "{} '{}' has no parent",
                    level,
                    node.slug()
                )));
            }
            (Some(parent_level), Some(parent_id)) => {
                if !self.table(parent_level).nodes.contains_key(parent_id) {
                    return Err(StoreError::MissingParent {
                        level,
                        slug: node.slug().clone(),
                        parent_id: parent_id.clone(),
                    });
                }
            }
        }

        let table = &mut self.levels[level.rank()];
        let parent_key = node.parent_id().cloned();
        if table
            .ordered(parent_key.as_ref())
            .any(|sibling| sibling.slug() == node.slug())
        {
            return Err(StoreError::DuplicateSlug {
                level,
                slug: node.slug().clone(),
            });
        }

        table
            .siblings
            .entry(parent_key)
            .or_default()
            .insert(node.position());
        table.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Sets a node's activity flag. Returns `false` if no such node exists.
    pub fn set_active(&mut self, level: Level, id: &NodeId, is_active: bool) -> bool {
        match self.levels[level.rank()].nodes.get_mut(id) {
            Some(node) => {
                *node = node.with_active(is_active);
                true
            }
            None => false,
        }
    }

    /// Returns the number of stored nodes across all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(|t| t.nodes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NodeRepository for MemoryStore {
    fn first_active_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
    ) -> StoreResult<Option<Node>> {
        Ok(self.table(child_level).first_active(parent_id))
    }

    fn last_active_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
    ) -> StoreResult<Option<Node>> {
        Ok(self.table(child_level).last_active(parent_id))
    }

    fn next_active_sibling(
        &self,
        parent_id: &NodeId,
        level: Level,
        after: &Position,
    ) -> StoreResult<Option<Node>> {
        Ok(self.table(level).range_active(
            parent_id,
            (Bound::Excluded(after), Bound::Unbounded),
            false,
        ))
    }

    fn prev_active_sibling(
        &self,
        parent_id: &NodeId,
        level: Level,
        before: &Position,
    ) -> StoreResult<Option<Node>> {
        Ok(self.table(level).range_active(
            parent_id,
            (Bound::Unbounded, Bound::Excluded(before)),
            true,
        ))
    }

    fn parent(&self, node: &Node, level: Level) -> StoreResult<Option<(Node, Level)>> {
        parent_via_lookup(self, node, level)
    }
}

impl NodeLookup for MemoryStore {
    fn get_node(&self, level: Level, id: &NodeId) -> StoreResult<Option<Node>> {
        Ok(self.table(level).nodes.get(id).cloned())
    }

    fn find_exam(&self, slug: &Slug) -> StoreResult<Option<Node>> {
        Ok(self
            .table(Level::Exam)
            .ordered(None)
            .find(|n| n.slug() == slug)
            .cloned())
    }

    fn find_child(
        &self,
        parent_id: &NodeId,
        child_level: Level,
        slug: &Slug,
    ) -> StoreResult<Option<Node>> {
        Ok(self
            .table(child_level)
            .ordered(Some(parent_id))
            .find(|n| n.slug() == slug)
            .cloned())
    }

    fn exams(&self) -> StoreResult<Vec<Node>> {
        Ok(self.table(Level::Exam).ordered(None).cloned().collect())
    }
}
