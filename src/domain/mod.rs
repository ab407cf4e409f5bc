//! Core types: Level, Node, NodeId, Slug, NodePath, Link

mod level;
mod link;
mod node;
mod node_id;
mod path;
mod slug;

pub use level::{LEVELS, Level, LevelDescriptor, ParseLevelError};
pub use link::{Adjacent, Link};
pub use node::{Node, NodeBuilder, Position};
pub use node_id::{NodeId, ParseNodeIdError};
pub use path::{NodePath, PathError};
pub use slug::{ParseSlugError, Slug};
