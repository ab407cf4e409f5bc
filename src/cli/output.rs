//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Level, Link, Node};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain hrefs, one per line
    Hrefs,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A node with both of its neighbours.
#[derive(Debug, Serialize)]
pub struct NavReport {
    pub current: Link,
    pub prev: Option<Link>,
    pub next: Option<Link>,
}

/// One exam in listing output.
#[derive(Debug, Serialize)]
pub struct ExamListing {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub order: i64,
    pub active: bool,
}

impl From<&Node> for ExamListing {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id().to_string(),
            slug: node.slug().to_string(),
            title: node.title().to_string(),
            order: node.order(),
            active: node.is_active(),
        }
    }
}

/// Node count for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: Level,
    pub count: u64,
}

/// Result of a `load` run.
#[derive(Debug, Serialize)]
pub struct LoadSummary {
    pub nodes: usize,
    pub replaced: bool,
    pub dry_run: bool,
    pub levels: Vec<LevelCount>,
}
