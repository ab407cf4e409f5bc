//! Command handlers for the CLI.

mod exams;
mod load;
mod nav;
mod toggle;
mod walk;


use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::domain::{Link, Slug};
use crate::nav::parse_slug_path;
use crate::store::SqliteStore;

// Re-export public items
pub use exams::{exam_hrefs, handle_exams};
pub use load::{handle_load, load_outline};
pub use nav::{handle_nav, nav_report};
pub use toggle::{handle_toggle, toggle_node};
pub use walk::{handle_walk, walk_exam};

// ===========================================
// Shared Utilities
// ===========================================

/// Settings resolved from flags and the config file.
#[derive(Debug, Clone)]
pub struct Context {
    pub db: PathBuf,
    pub base_href: String,
}

/// Opens the database at `db`, creating it if needed.
pub(crate) fn open_store(db: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db).with_context(|| format!("failed to open database at {}", db.display()))
}

/// Parses a user-supplied slug path.
pub(crate) fn parse_path(input: &str) -> Result<Vec<Slug>> {
    parse_slug_path(input).with_context(|| format!("invalid slug path: {}", input))
}

/// Renders an optional link for human output.
pub(crate) fn describe(link: Option<&Link>) -> String {
    match link {
        Some(link) => link.to_string(),
        None => "(none)".to_string(),
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
