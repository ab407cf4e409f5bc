//! The seven fixed ranks of the content taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One rank of the content taxonomy, from `Exam` (root) to `Definition` (leaf).
///
/// Levels are totally ordered by rank. Every level except `Definition` has
/// exactly one child level, and every level except `Exam` has exactly one
/// parent level.
///
/// # Examples
///
/// ```
/// use syllabus::domain::Level;
///
/// assert_eq!(Level::Unit.parent(), Some(Level::Subject));
/// assert_eq!(Level::Unit.child(), Some(Level::Chapter));
/// assert_eq!(Level::Exam.parent(), None);
/// assert!(Level::Exam < Level::Definition);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Exam,
    Subject,
    Unit,
    Chapter,
    Topic,
    Subtopic,
    Definition,
}

/// Static description of one level: its neighbours and where it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub level: Level,
    pub parent: Option<Level>,
    pub child: Option<Level>,
    /// Storage binding: the table holding nodes of this level.
    pub table: &'static str,
}

/// Descriptor table, indexed by rank.
pub const LEVELS: [LevelDescriptor; Level::COUNT] = [
    LevelDescriptor {
        level: Level::Exam,
        parent: None,
        child: Some(Level::Subject),
        table: "exams",
    },
    LevelDescriptor {
        level: Level::Subject,
        parent: Some(Level::Exam),
        child: Some(Level::Unit),
        table: "subjects",
    },
    LevelDescriptor {
        level: Level::Unit,
        parent: Some(Level::Subject),
        child: Some(Level::Chapter),
        table: "units",
    },
    LevelDescriptor {
        level: Level::Chapter,
        parent: Some(Level::Unit),
        child: Some(Level::Topic),
        table: "chapters",
    },
    LevelDescriptor {
        level: Level::Topic,
        parent: Some(Level::Chapter),
        child: Some(Level::Subtopic),
        table: "topics",
    },
    LevelDescriptor {
        level: Level::Subtopic,
        parent: Some(Level::Topic),
        child: Some(Level::Definition),
        table: "subtopics",
    },
    LevelDescriptor {
        level: Level::Definition,
        parent: Some(Level::Subtopic),
        child: None,
        table: "definitions",
    },
];

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown level '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl Level {
    /// Number of levels in the taxonomy.
    pub const COUNT: usize = 7;

    /// All levels, root first.
    pub const ALL: [Level; Level::COUNT] = [
        Level::Exam,
        Level::Subject,
        Level::Unit,
        Level::Chapter,
        Level::Topic,
        Level::Subtopic,
        Level::Definition,
    ];

    /// Returns the zero-based rank (`Exam` is 0).
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Returns this level's descriptor.
    pub fn descriptor(self) -> &'static LevelDescriptor {
        &LEVELS[self.rank()]
    }

    pub fn parent(self) -> Option<Level> {
        self.descriptor().parent
    }

    pub fn child(self) -> Option<Level> {
        self.descriptor().child
    }

    /// Returns the table this level is stored in.
    pub fn table(self) -> &'static str {
        self.descriptor().table
    }

    /// Returns the lowercase name (`"exam"`, `"subject"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Exam => "exam",
            Level::Subject => "subject",
            Level::Unit => "unit",
            Level::Chapter => "chapter",
            Level::Topic => "topic",
            Level::Subtopic => "subtopic",
            Level::Definition => "definition",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or(ParseLevelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table_is_indexed_by_rank() {
        for (rank, descriptor) in LEVELS.iter().enumerate() {
            assert_eq!(descriptor.level.rank(), rank);
            assert_eq!(Level::ALL[rank], descriptor.level);
        }
    }

    #[test]
    fn parent_and_child_are_inverse() {
        for level in Level::ALL {
            if let Some(child) = level.child() {
                assert_eq!(child.parent(), Some(level));
                assert_eq!(child.rank(), level.rank() + 1);
            }
        }
    }

    #[test]
    fn only_exam_lacks_parent_and_only_definition_lacks_child() {
        let rootless: Vec<_> = Level::ALL.iter().filter(|l| l.parent().is_none()).collect();
        let leafless: Vec<_> = Level::ALL.iter().filter(|l| l.child().is_none()).collect();
        assert_eq!(rootless, vec![&Level::Exam]);
        assert_eq!(leafless, vec![&Level::Definition]);
    }

    #[test]
    fn levels_are_totally_ordered() {
        assert!(Level::Exam < Level::Subject);
        assert!(Level::Topic < Level::Subtopic);
        assert!(Level::Subtopic < Level::Definition);
    }

    #[test]
    fn tables_are_distinct() {
        let mut tables: Vec<_> = Level::ALL.iter().map(|l| l.table()).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), Level::COUNT);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Chapter".parse::<Level>().unwrap(), Level::Chapter);
        assert_eq!(" subtopic ".parse::<Level>().unwrap(), Level::Subtopic);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "section".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("section"));
    }

    #[test]
    fn display_matches_serde_name() {
        let json = serde_json::to_string(&Level::Definition).unwrap();
        assert_eq!(json, format!("\"{}\"", Level::Definition));
    }
}
