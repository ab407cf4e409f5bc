//! Resolved ancestor chain from an Exam down to the node being viewed.

use super::{Level, Node, Slug};
use thiserror::Error;

/// Reasons a chain of nodes is not a usable navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// No nodes were supplied.
    #[error("path is empty")]
    Empty,

    /// More nodes than there are levels.
    #[error("path has {len} nodes but the taxonomy has only {} levels", Level::COUNT)]
    TooDeep { len: usize },

    /// The first node is not a root.
    #[error("path must start at an exam, but '{slug}' has a parent")]
    NotRooted { slug: Slug },

    /// A node's parent is not the node before it.
    #[error("{level} '{slug}' is not a child of the preceding node")]
    BrokenChain { level: Level, slug: Slug },

    /// An ancestor of the target is hidden from navigation.
    #[error("{level} '{slug}' is inactive")]
    InactiveAncestor { level: Level, slug: Slug },
}

/// An ordered chain of nodes from an Exam (index 0) to a target node.
///
/// The level of each node is its index. Every node but the last must be
/// active; the target's own activity is the caller's concern.
///
/// # Examples
///
/// ```
/// use syllabus::domain::{Level, Node, NodeId, NodePath, Slug};
///
/// let exam = Node::builder(NodeId::from_u128(1), Slug::new("neet").unwrap(), "NEET").build();
/// let physics = Node::builder(NodeId::from_u128(2), Slug::new("physics").unwrap(), "Physics")
///     .parent(exam.id().clone())
///     .build();
///
/// let path = NodePath::new(vec![exam, physics]).unwrap();
/// assert_eq!(path.target_level(), Level::Subject);
/// assert_eq!(path.target().title(), "Physics");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    nodes: Vec<Node>,
}

impl NodePath {
    /// Validates `nodes` as a chain rooted at an Exam.
    pub fn new(nodes: Vec<Node>) -> Result<Self, PathError> {
        if nodes.is_empty() {
            return Err(PathError::Empty);
        }
        if nodes.len() > Level::COUNT {
            return Err(PathError::TooDeep { len: nodes.len() });
        }
        if nodes[0].parent_id().is_some() {
            return Err(PathError::NotRooted {
                slug: nodes[0].slug().clone(),
            });
        }

        for (rank, pair) in nodes.windows(2).enumerate() {
            let (parent, child) = (&pair[0], &pair[1]);
            if child.parent_id() != Some(parent.id()) {
                return Err(PathError::BrokenChain {
                    level: Level::ALL[rank + 1],
                    slug: child.slug().clone(),
                });
            }
        }

        let target = nodes.len() - 1;
        if let Some(rank) = nodes[..target].iter().position(|n| !n.is_active()) {
            return Err(PathError::InactiveAncestor {
                level: Level::ALL[rank],
                slug: nodes[rank].slug().clone(),
            });
        }

        Ok(Self { nodes })
    }

    /// Returns the node being viewed.
    pub fn target(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Returns the level of the node being viewed.
    pub fn target_level(&self) -> Level {
        Level::ALL[self.nodes.len() - 1]
    }

    /// Returns the Exam the path is rooted at.
    pub fn exam(&self) -> &Node {
        &self.nodes[0]
    }

    /// Returns the nodes strictly above `level`.
    pub fn ancestors_of(&self, level: Level) -> &[Node] {
        &self.nodes[..level.rank().min(self.nodes.len())]
    }

    /// Returns the path ending at the target's parent, `None` for an Exam.
    pub fn parent_path(&self) -> Option<NodePath> {
        match self.nodes.len() {
            1 => None,
            len => Some(Self {
                nodes: self.nodes[..len - 1].to_vec(),
            }),
        }
    }

    /// Returns the path extended by one child of the target.
    ///
    /// Only the structure is checked (depth and parent link); the current
    /// target's activity is taken as the caller found it.
    pub fn child(&self, node: Node) -> Result<NodePath, PathError> {
        let depth = self.nodes.len() + 1;
        if depth > Level::COUNT {
            return Err(PathError::TooDeep { len: depth });
        }
        if node.parent_id() != Some(self.target().id()) {
            return Err(PathError::BrokenChain {
                level: Level::ALL[depth - 1],
                slug: node.slug().clone(),
            });
        }

        let mut nodes = Vec::with_capacity(depth);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);
        Ok(Self { nodes })
    }

    /// Returns the slugs joined by `/`, e.g. `neet/physics/mechanics`.
    pub fn slug_path(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.slug().as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
