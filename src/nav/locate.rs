//! Turning user input (slug paths, ids) into validated node paths.

use crate::domain::{Level, Node, NodeId, NodePath, ParseSlugError, PathError, Slug};
use crate::store::{NodeLookup, NodeRepository, StoreError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while locating a node.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no node at '{path}'")]
    NotFound { path: String },

    #[error("'{path}' is inactive")]
    Inactive { path: String },

    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    #[error(transparent)]
    Repository(#[from] StoreError),
}

/// Splits `neet/physics/mechanics` into validated slugs.
///
/// Leading and trailing slashes are ignored.
pub fn parse_slug_path(input: &str) -> Result<Vec<Slug>, ParseSlugError> {
    input
        .trim_matches('/')
        .split('/')
        .map(Slug::new)
        .collect()
}

/// Resolves a slug path into a navigable [`NodePath`].
///
/// Every node along the way, the target included, must exist and be active.
pub fn locate<R>(repo: &R, slugs: &[Slug]) -> Result<NodePath, LocateError>
where
    R: NodeLookup + ?Sized,
{
    let (_, nodes) = walk_slugs(repo, slugs)?;
    if let Some(rank) = nodes.iter().position(|n| !n.is_active()) {
        return Err(LocateError::Inactive {
            path: join(&slugs[..=rank]),
        });
    }
    Ok(NodePath::new(nodes)?)
}

/// Finds the node at a slug path regardless of activity.
///
/// Used by commands that change activity, which must be able to reach
/// hidden nodes.
pub fn find<R>(repo: &R, slugs: &[Slug]) -> Result<(Level, Node), LocateError>
where
    R: NodeLookup + ?Sized,
{
    let (level, mut nodes) = walk_slugs(repo, slugs)?;
    match nodes.pop() {
        Some(node) => Ok((level, node)),
        None => Err(LocateError::NotFound {
            path: String::new(),
        }),
    }
}

/// Resolves a node id into a navigable [`NodePath`] by climbing parents.
pub fn locate_id<R>(repo: &R, id: &NodeId) -> Result<NodePath, LocateError>
where
    R: NodeLookup + NodeRepository + ?Sized,
{
    let mut found = None;
    for level in Level::ALL {
        if let Some(node) = repo.get_node(level, id)? {
            found = Some((node, level));
            break;
        }
    }
    let Some((mut node, mut level)) = found else {
        return Err(LocateError::NotFound {
            path: id.to_string(),
        });
    };
    debug!(%id, %level, "found node by id");

    let mut chain = vec![node.clone()];
    while let Some((parent, parent_level)) = repo.parent(&node, level)? {
        chain.push(parent.clone());
        node = parent;
        level = parent_level;
    }
    chain.reverse();

    if chain.iter().any(|n| !n.is_active()) {
        return Err(LocateError::Inactive {
            path: chain
                .iter()
                .map(|n| n.slug().as_str())
                .collect::<Vec<_>>()
                .join("/"),
        });
    }
    Ok(NodePath::new(chain)?)
}

fn walk_slugs<R>(repo: &R, slugs: &[Slug]) -> Result<(Level, Vec<Node>), LocateError>
where
    R: NodeLookup + ?Sized,
{
    let Some((exam_slug, rest)) = slugs.split_first() else {
        return Err(PathError::Empty.into());
    };
    if slugs.len() > Level::COUNT {
        return Err(PathError::TooDeep { len: slugs.len() }.into());
    }

    let not_found = |upto: usize| LocateError::NotFound {
        path: join(&slugs[..upto]),
    };

    let exam = repo.find_exam(exam_slug)?.ok_or_else(|| not_found(1))?;
    let mut level = Level::Exam;
    let mut nodes = Vec::with_capacity(slugs.len());
    nodes.push(exam);

    for (i, slug) in rest.iter().enumerate() {
        // Depth is bounded above, so every level here has a child.
        let Some(child_level) = level.child() else {
            return Err(PathError::TooDeep { len: slugs.len() }.into());
        };
        let parent_id = nodes[nodes.len() - 1].id().clone();
        let child = repo
            .find_child(&parent_id, child_level, slug)?
            .ok_or_else(|| not_found(i + 2))?;
        nodes.push(child);
        level = child_level;
    }

    Ok((level, nodes))
}

fn join(slugs: &[Slug]) -> String {
    slugs
        .iter()
        .map(Slug::as_str)
        .collect::<Vec<_>>()
        .join("/")
}
