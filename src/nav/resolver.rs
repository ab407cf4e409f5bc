//! Pre-order neighbour resolution within one Exam.

use crate::domain::{Adjacent, Level, Link, Node, NodePath, PathError};
use crate::store::{NodeRepository, StoreError};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that abort a navigation computation.
///
/// A missing neighbour is not an error; it is reported as `None`.
#[derive(Debug, Error)]
pub enum NavError {
    /// The supplied chain of nodes is not a valid path.
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    /// The repository failed; no partial result is returned.
    #[error("repository error: {0}")]
    Repository(#[from] StoreError),

    /// The caller's deadline passed before the computation finished.
    #[error("navigation deadline exceeded")]
    DeadlineExceeded,
}

/// Result type for navigation.
pub type NavResult<T> = Result<T, NavError>;

/// Direction of travel through the pre-order sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Computes the nodes before and after a target in a pre-order walk of its
/// Exam's tree, skipping inactive nodes and their subtrees.
///
/// The resolver only reads: it holds a shared borrow of the repository and
/// no state of its own, so independent calls may run concurrently.
///
/// # Examples
///
/// ```
/// use syllabus::domain::{Level, Node, NodeId, NodePath, Slug};
/// use syllabus::nav::NavigationResolver;
/// use syllabus::store::MemoryStore;
///
/// let node = |id: u128, slug: &str, parent: Option<u128>| {
///     let b = Node::builder(NodeId::from_u128(id), Slug::new(slug).unwrap(), slug).order(id as i64);
///     match parent {
///         Some(p) => b.parent(NodeId::from_u128(p)).build(),
///         None => b.build(),
///     }
/// };
/// let exam = node(1, "neet", None);
/// let physics = node(2, "physics", Some(1));
/// let chemistry = node(3, "chemistry", Some(1));
/// let store = MemoryStore::from_nodes([
///     (Level::Exam, exam.clone()),
///     (Level::Subject, physics.clone()),
///     (Level::Subject, chemistry),
/// ]).unwrap();
///
/// let path = NodePath::new(vec![exam, physics]).unwrap();
/// let adjacent = NavigationResolver::new(&store).resolve_adjacent(&path).unwrap();
/// assert_eq!(adjacent.prev, None);
/// assert_eq!(adjacent.next.unwrap().href(), "/neet/chemistry");
/// ```
pub struct NavigationResolver<'r, R: ?Sized> {
    repo: &'r R,
    base_href: String,
    deadline: Option<Instant>,
}

impl<'r, R: NodeRepository + ?Sized> NavigationResolver<'r, R> {
    /// Creates a resolver reading from `repo`, with hrefs rooted at `/`.
    pub fn new(repo: &'r R) -> Self {
        Self {
            repo,
            base_href: String::new(),
            deadline: None,
        }
    }

    /// Prefixes every link href with `base_href`.
    pub fn with_base_href(mut self, base_href: impl Into<String>) -> Self {
        self.base_href = base_href.into();
        self
    }

    /// Fails with [`NavError::DeadlineExceeded`] once `deadline` passes.
    ///
    /// Checked before every repository lookup.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    // ===========================================
    // Public entry points
    // ===========================================

    /// Returns both neighbours of the path's target.
    pub fn resolve_adjacent(&self, path: &NodePath) -> NavResult<Adjacent> {
        let prev = self.prev(path)?;
        let next = self.next(path)?;
        debug!(
            exam = %path.exam().slug(),
            target_path = %path.slug_path(),
            prev = prev.as_ref().map(|l| l.href()),
            next = next.as_ref().map(|l| l.href()),
            "resolved adjacent nodes"
        );
        Ok(Adjacent { prev, next })
    }

    /// Validates `nodes` as a path, then resolves both neighbours.
    ///
    /// An invalid chain is rejected before any repository call.
    pub fn resolve_chain(&self, nodes: Vec<Node>) -> NavResult<Adjacent> {
        let path = NodePath::new(nodes)?;
        self.resolve_adjacent(&path)
    }

    /// Returns a link to the node after the target, if any.
    pub fn next(&self, path: &NodePath) -> NavResult<Option<Link>> {
        Ok(self.next_path(path)?.map(|p| self.link(&p)))
    }

    /// Returns a link to the node before the target, if any.
    pub fn prev(&self, path: &NodePath) -> NavResult<Option<Link>> {
        Ok(self.prev_path(path)?.map(|p| self.link(&p)))
    }

    /// Returns the full path of the node after the target.
    pub fn next_path(&self, path: &NodePath) -> NavResult<Option<NodePath>> {
        // Pre-order goes deeper before it goes sideways.
        if let Some(child_level) = path.target_level().child() {
            self.checkpoint()?;
            if let Some(child) = self.repo.first_active_child(path.target().id(), child_level)? {
                trace!(%child_level, slug = %child.slug(), "next: first child");
                return self.extend(path, child).map(Some);
            }
        }

        // No children left: climb until some ancestor-or-self has a later
        // sibling. The Exam's own siblings are outside the scope.
        let mut current = path.clone();
        while let Some(parent) = current.parent_path() {
            let level = current.target_level();
            self.checkpoint()?;
            let sibling = self.repo.next_active_sibling(
                parent.target().id(),
                level,
                &current.target().position(),
            )?;
            if let Some(sibling) = sibling {
                trace!(%level, slug = %sibling.slug(), "next: following sibling");
                return self.extend(&parent, sibling).map(Some);
            }
            current = parent;
        }

        trace!(target_path = %path.slug_path(), "next: end of exam");
        Ok(None)
    }

    /// Returns the full path of the node before the target.
    pub fn prev_path(&self, path: &NodePath) -> NavResult<Option<NodePath>> {
        let Some(parent) = path.parent_path() else {
            return Ok(None);
        };

        let level = path.target_level();
        self.checkpoint()?;
        let sibling = self.repo.prev_active_sibling(
            parent.target().id(),
            level,
            &path.target().position(),
        )?;

        match sibling {
            // The predecessor is the last node of the sibling's subtree.
            Some(sibling) => {
                trace!(%level, slug = %sibling.slug(), "prev: preceding sibling");
                self.last_descendant(self.extend(&parent, sibling)?).map(Some)
            }
            // First child of the Exam: the Exam itself is never a target.
            None if parent.target_level() == Level::Exam => {
                trace!(target_path = %path.slug_path(), "prev: start of exam");
                Ok(None)
            }
            None => {
                trace!(slug = %parent.target().slug(), "prev: parent");
                Ok(Some(parent))
            }
        }
    }

    /// Returns the path of the last node in pre-order under the target
    /// (the target itself when it has no active children).
    pub fn last_descendant(&self, path: NodePath) -> NavResult<NodePath> {
        let mut path = path;
        while let Some(child_level) = path.target_level().child() {
            self.checkpoint()?;
            match self.repo.last_active_child(path.target().id(), child_level)? {
                Some(child) => path = self.extend(&path, child)?,
                None => break,
            }
        }
        Ok(path)
    }

    /// Iterates over the pre-order sequence starting after `start`.
    pub fn walk(&self, start: NodePath, direction: Direction) -> Walk<'_, 'r, R> {
        Walk {
            resolver: self,
            current: Some(start),
            direction,
        }
    }

    /// Builds the link for a path's target from the path's own slugs.
    pub fn link(&self, path: &NodePath) -> Link {
        let level = path.target_level();
        Link::to_node(
            &self.base_href,
            path.ancestors_of(level),
            path.target(),
            level,
        )
    }

    // ===========================================
    // Helpers
    // ===========================================

    fn checkpoint(&self) -> NavResult<()> {
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            debug!("navigation deadline exceeded");
            return Err(NavError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Appends a node the repository returned as a child of `path`'s target.
    fn extend(&self, path: &NodePath, node: Node) -> NavResult<NodePath> {
        path.child(node).map_err(|e| {
            NavError::Repository(StoreError::InvalidData(format!(
                "repository returned a node outside the expected chain: {}",
                e
            )))
        })
    }
}

/// Iterator over successive paths in one direction; see
/// [`NavigationResolver::walk`].
///
/// Stops after the first `None` or error.
pub struct Walk<'a, 'r, R: ?Sized> {
    resolver: &'a NavigationResolver<'r, R>,
    current: Option<NodePath>,
    direction: Direction,
}

impl<R: NodeRepository + ?Sized> Iterator for Walk<'_, '_, R> {
    type Item = NavResult<NodePath>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let step = match self.direction {
            Direction::Forward => self.resolver.next_path(&current),
            Direction::Backward => self.resolver.prev_path(&current),
        };
        match step {
            Ok(Some(path)) => {
                self.current = Some(path.clone());
                Some(Ok(path))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
