//! Outline files: a nested YAML or JSON description of one or more Exams.
//!
//! ```yaml
//! exams:
//!   - title: NEET
//!     children:
//!       - title: Physics
//!         children:
//!           - title: Mechanics
//!             order: 1
//!           - title: Optics
//!             active: false
//! ```

use super::slugify;
use crate::domain::{Level, Node, NodeId, ParseSlugError, Slug};
use serde::Deserialize;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while reading or flattening an outline.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("outline file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },

    #[error("unsupported outline format for {path}; expected .yaml, .yml or .json")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid YAML outline: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON outline: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{path}' is nested deeper than the {} taxonomy levels", Level::COUNT)]
    TooDeep { path: String },

    #[error("{level} slug '{path}' appears twice under the same parent")]
    DuplicateSlug { level: Level, path: String },

    #[error("id {id} appears more than once")]
    DuplicateId { id: NodeId },

    #[error("title '{title}' does not produce a usable slug: {source}")]
    InvalidSlug {
        title: String,
        #[source]
        source: ParseSlugError,
    },
}

/// Parsed outline document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outline {
    #[serde(default)]
    pub exams: Vec<OutlineEntry>,
}

/// One node in an outline, with its children one level down.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutlineEntry {
    pub title: String,

    /// Defaults to the slugified title.
    #[serde(default)]
    pub slug: Option<Slug>,

    /// Defaults to the 1-based position among siblings.
    #[serde(default)]
    pub order: Option<i64>,

    #[serde(default)]
    pub active: Option<bool>,

    /// Stable id; a fresh one is generated when absent.
    #[serde(default)]
    pub id: Option<NodeId>,

    #[serde(default)]
    pub children: Vec<OutlineEntry>,
}

impl Outline {
    pub fn from_yaml(content: &str) -> Result<Self, OutlineError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, OutlineError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads an outline, choosing the parser by file extension.
    pub fn read(path: &Path) -> Result<Self, OutlineError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, OutlineError> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => {
                return Err(OutlineError::UnsupportedFormat { path: path.into() });
            }
        };

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => OutlineError::NotFound { path: path.into() },
            _ => OutlineError::Io {
                path: path.into(),
                source: e,
            },
        })?;
        let content = String::from_utf8(bytes).map_err(|e| OutlineError::InvalidEncoding {
            path: path.into(),
            encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        })?;
        let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);

        parse(content)
    }

    /// Flattens the outline into `(level, node)` pairs, parents before
    /// children, ready for a store to insert in order.
    ///
    /// # Errors
    ///
    /// Fails if an entry sits below the Definition level, if two siblings
    /// share a slug, or if an explicit id is repeated.
    pub fn to_nodes(&self) -> Result<Vec<(Level, Node)>, OutlineError> {
        let mut flattener = Flattener {
            nodes: Vec::new(),
            seen_ids: HashSet::new(),
        };
        flattener.siblings(&self.exams, Level::Exam, None, "")?;
        Ok(flattener.nodes)
    }

    /// Returns the total number of entries at every depth.
    pub fn len(&self) -> usize {
        fn count(entries: &[OutlineEntry]) -> usize {
            entries.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.exams)
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }
}

struct Flattener {
    nodes: Vec<(Level, Node)>,
    seen_ids: HashSet<NodeId>,
}

impl Flattener {
    fn siblings(
        &mut self,
        entries: &[OutlineEntry],
        level: Level,
        parent: Option<&NodeId>,
        prefix: &str,
    ) -> Result<(), OutlineError> {
        let mut slugs = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let slug = match &entry.slug {
                Some(slug) => slug.clone(),
                None => Slug::new(&slugify(&entry.title)).map_err(|source| {
                    OutlineError::InvalidSlug {
                        title: entry.title.clone(),
                        source,
                    }
                })?,
            };
            let path = if prefix.is_empty() {
                slug.to_string()
            } else {
                format!("{}/{}", prefix, slug)
            };
            if !slugs.insert(slug.clone()) {
                return Err(OutlineError::DuplicateSlug { level, path });
            }

            let id = entry.id.clone().unwrap_or_else(NodeId::new);
            if !self.seen_ids.insert(id.clone()) {
                return Err(OutlineError::DuplicateId { id });
            }

            let order = entry.order.unwrap_or(index as i64 + 1);
            let mut builder = Node::builder(id.clone(), slug, entry.title.clone())
                .order(order)
                .active(entry.active.unwrap_or(true));
            if let Some(parent) = parent {
                builder = builder.parent(parent.clone());
            }
            self.nodes.push((level, builder.build()));

            if !entry.children.is_empty() {
                let Some(child_level) = level.child() else {
                    let first = &entry.children[0];
                    let child_slug = first
                        .slug
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| slugify(&first.title));
                    return Err(OutlineError::TooDeep {
                        path: format!("{}/{}", path, child_slug),
                    });
                };
                self.siblings(&entry.children, child_level, Some(&id), &path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
exams:
  - title: NEET
    children:
      - title: Physics
        children:
          - title: Laws of Motion
            slug: motion
            order: 10
          - title: Optics
            active: false
      - title: Chemistry
"#;

    fn summary(nodes: &[(Level, Node)]) -> Vec<(Level, String, i64, bool)> {
        nodes
            .iter()
            .map(|(level, node)| {
                (
                    *level,
                    node.slug().to_string(),
                    node.order(),
                    node.is_active(),
                )
            })
            .collect()
    }

    // ===========================================
    // Parsing
    // ===========================================

    #[test]
    fn yaml_outline_flattens_in_pre_order() {
        let nodes = Outline::from_yaml(SAMPLE).unwrap().to_nodes().unwrap();
        assert_eq!(
            summary(&nodes),
            vec![
                (Level::Exam, "neet".to_string(), 1, true),
                (Level::Subject, "physics".to_string(), 1, true),
                (Level::Unit, "motion".to_string(), 10, true),
                (Level::Unit, "optics".to_string(), 2, false),
                (Level::Subject, "chemistry".to_string(), 2, true),
            ]
        );
    }

    #[test]
    fn children_point_at_their_parent() {
        let nodes = Outline::from_yaml(SAMPLE).unwrap().to_nodes().unwrap();
        let physics = &nodes[1].1;
        assert_eq!(nodes[0].1.parent_id(), None);
        assert_eq!(physics.parent_id(), Some(nodes[0].1.id()));
        assert_eq!(nodes[2].1.parent_id(), Some(physics.id()));
        assert_eq!(nodes[4].1.parent_id(), Some(nodes[0].1.id()));
    }

    #[test]
    fn json_outline_keeps_explicit_ids() {
        let json = r#"{"exams": [{"title": "JEE", "id": "01HQ3K5M7NXJK4QZPW8V2R6T9Y"}]}"#;
        let nodes = Outline::from_json(json).unwrap().to_nodes().unwrap();
        assert_eq!(nodes[0].1.id().to_string(), "01HQ3K5M7NXJK4QZPW8V2R6T9Y");
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Outline::from_yaml("exams:\n  - title: A\n    colour: red\n").unwrap_err();
        assert!(matches!(err, OutlineError::Yaml(_)));
    }

    #[test]
    fn rejects_invalid_explicit_slug() {
        let err = Outline::from_yaml("exams:\n  - title: A\n    slug: Not Valid\n").unwrap_err();
        assert!(matches!(err, OutlineError::Yaml(_)));
    }

    // ===========================================
    // Structural errors
    // ===========================================

    #[test]
    fn rejects_duplicate_sibling_slugs() {
        let yaml = "exams:\n  - title: NEET\n    children:\n      - title: Physics\n      - title: physics\n";
        let err = Outline::from_yaml(yaml).unwrap().to_nodes().unwrap_err();
        match err {
            OutlineError::DuplicateSlug { level, path } => {
                assert_eq!(level, Level::Subject);
                assert_eq!(path, "neet/physics");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn same_slug_under_different_parents_is_fine() {
        let yaml = "exams:\n  - title: A\n    children:\n      - title: Intro\n  - title: B\n    children:\n      - title: Intro\n";
        assert_eq!(Outline::from_yaml(yaml).unwrap().to_nodes().unwrap().len(), 4);
    }

    #[test]
    fn rejects_nesting_below_definition() {
        let mut entry = OutlineEntry {
            title: "Too Deep".into(),
            ..entry_template()
        };
        for depth in (0..Level::COUNT).rev() {
            entry = OutlineEntry {
                title: format!("L{depth}"),
                children: vec![entry],
                ..entry_template()
            };
        }
        let outline = Outline {
            exams: vec![entry],
        };
        assert_eq!(outline.len(), Level::COUNT + 1);

        let err = outline.to_nodes().unwrap_err();
        match err {
            OutlineError::TooDeep { path } => assert_eq!(path, "l0/l1/l2/l3/l4/l5/l6/too-deep"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn entry_template() -> OutlineEntry {
        OutlineEntry {
            title: String::new(),
            slug: None,
            order: None,
            active: None,
            id: None,
            children: vec![],
        }
    }

    #[test]
    fn rejects_repeated_explicit_id() {
        let yaml = "exams:\n  - title: A\n    id: 01HQ3K5M7NXJK4QZPW8V2R6T9Y\n  - title: B\n    id: 01HQ3K5M7NXJK4QZPW8V2R6T9Y\n";
        let err = Outline::from_yaml(yaml).unwrap().to_nodes().unwrap_err();
        assert!(matches!(err, OutlineError::DuplicateId { .. }));
    }

    // ===========================================
    // Reading files
    // ===========================================

    fn temp_file(suffix: &str) -> NamedTempFile {
        tempfile::Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn read_picks_parser_by_extension() {
        let mut file = temp_file(".yml");
        file.write_all(SAMPLE.as_bytes()).unwrap();
        assert_eq!(Outline::read(file.path()).unwrap().len(), 5);
    }

    #[test]
    fn read_strips_utf8_bom() {
        let mut file = temp_file(".json");
        file.write_all("\u{FEFF}{\"exams\": []}".as_bytes()).unwrap();
        assert!(Outline::read(file.path()).unwrap().is_empty());
    }

    #[test]
    fn read_rejects_unknown_extension() {
        let file = temp_file(".toml");
        let err = Outline::read(file.path()).unwrap_err();
        assert!(matches!(err, OutlineError::UnsupportedFormat { .. }));
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let err = Outline::read(Path::new("/nonexistent/outline.yaml")).unwrap_err();
        assert!(matches!(err, OutlineError::NotFound { .. }));
    }
}
