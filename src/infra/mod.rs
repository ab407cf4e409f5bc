//! Outline files and slug generation

mod outline;
mod slug;

pub use outline::{Outline, OutlineEntry, OutlineError};
pub use slug::slugify;
