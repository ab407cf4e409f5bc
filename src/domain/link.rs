//! Navigation link values produced by the resolver.

use super::{Level, Node, NodeId};
use serde::Serialize;
use std::fmt;

/// A pointer at one node, with everything needed to render it.
///
/// `href` is built from the slugs of the node's full chain, Exam first,
/// never from request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    label: String,
    href: String,
    level: Level,
    id: NodeId,
}

impl Link {
    /// Builds a link to `node` at `level`, whose ancestors are `ancestors`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus::domain::{Level, Link, Node, NodeId, Slug};
    ///
    /// let exam = Node::builder(NodeId::from_u128(1), Slug::new("neet").unwrap(), "NEET").build();
    /// let physics = Node::builder(NodeId::from_u128(2), Slug::new("physics").unwrap(), "Physics")
    ///     .parent(exam.id().clone())
    ///     .build();
    ///
    /// let link = Link::to_node("/learn", &[exam], &physics, Level::Subject);
    /// assert_eq!(link.href(), "/learn/neet/physics");
    /// assert_eq!(link.label(), "Physics");
    /// ```
    pub fn to_node(base_href: &str, ancestors: &[Node], node: &Node, level: Level) -> Link {
        let mut href = base_href.trim_end_matches('/').to_string();
        for segment in ancestors.iter().chain(std::iter::once(node)) {
            href.push('/');
            href.push_str(segment.slug().as_str());
        }

        Link {
            label: node.title().to_string(),
            href,
            level,
            id: node.id().clone(),
        }
    }

    /// Returns the text to show for the link (the node's title).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the full-path href.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Returns the level of the linked node.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the id of the linked node.
    pub fn id(&self) -> &NodeId {
        &self.id
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) -> {}", self.label, self.level, self.href)
    }
}

/// The neighbours of a node in pre-order sequence.
///
/// `None` on either side means the node sits at that edge of its Exam's
/// tree; it is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Adjacent {
    pub prev: Option<Link>,
    pub next: Option<Link>,
}
