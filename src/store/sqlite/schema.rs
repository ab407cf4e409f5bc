//! SQLite schema creation for the content store.

use crate::domain::LEVELS;
use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the content store.
///
/// One table per level, named by the level descriptor. It is idempotent -
/// calling it multiple times is safe.
///
/// # Tables Created
/// - `exams`, `subjects`, `units`, `chapters`, `topics`, `subtopics`,
///   `definitions` - nodes of each level
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    for descriptor in &LEVELS {
        let table = descriptor.table;

        // Exams are roots; every other level references its parent level.
        let (parent_column, unique) = match descriptor.parent {
            None => (
                "parent_id TEXT CHECK (parent_id IS NULL)".to_string(),
                "UNIQUE (slug)",
            ),
            Some(parent) => (
                format!(
                    "parent_id TEXT NOT NULL REFERENCES {}(id) ON DELETE CASCADE",
                    parent.table()
                ),
                "UNIQUE (parent_id, slug)",
            ),
        };

        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY,
                {parent_column},
                slug TEXT NOT NULL,
                title TEXT NOT NULL,
                sort_order INTEGER NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                {unique}
            );
            CREATE INDEX IF NOT EXISTS idx_{table}_siblings
                ON {table}(parent_id, is_active, sort_order, id);"
        ))?;
    }

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the highest applied schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Level;

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |_| Ok(true),
        )
        .unwrap_or(false)
    }

    fn insert(conn: &Connection, table: &str, id: &str, parent: Option<&str>, slug: &str) -> rusqlite::Result<usize> {
        conn.execute(
            &format!(
                "INSERT INTO {table} (id, parent_id, slug, title, sort_order) VALUES (?1, ?2, ?3, ?3, 1)"
            ),
            rusqlite::params![id, parent, slug],
        )
    }

    #[test]
    fn creates_a_table_per_level() {
        let conn = test_connection();
        for level in Level::ALL {
            assert!(table_exists(&conn, level.table()), "missing {}", level.table());
        }
        assert!(table_exists(&conn, "schema_version"));
    }

    #[test]
    fn create_schema_is_idempotent() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn exam_rejects_parent_id() {
        let conn = test_connection();
        assert!(insert(&conn, "exams", "E1", Some("X"), "neet").is_err());
    }

    #[test]
    fn exam_slugs_are_unique() {
        let conn = test_connection();
        insert(&conn, "exams", "E1", None, "neet").unwrap();
        assert!(insert(&conn, "exams", "E2", None, "neet").is_err());
    }

    #[test]
    fn child_requires_existing_parent() {
        let conn = test_connection();
        assert!(insert(&conn, "subjects", "S1", Some("E1"), "physics").is_err());
    }

    #[test]
    fn sibling_slugs_are_unique_per_parent() {
        let conn = test_connection();
        insert(&conn, "exams", "E1", None, "neet").unwrap();
        insert(&conn, "exams", "E2", None, "jee").unwrap();
        insert(&conn, "subjects", "S1", Some("E1"), "physics").unwrap();
        insert(&conn, "subjects", "S2", Some("E2"), "physics").unwrap();
        assert!(insert(&conn, "subjects", "S3", Some("E1"), "physics").is_err());
    }

    #[test]
    fn deleting_parent_cascades() {
        let conn = test_connection();
        insert(&conn, "exams", "E1", None, "neet").unwrap();
        insert(&conn, "subjects", "S1", Some("E1"), "physics").unwrap();
        insert(&conn, "units", "U1", Some("S1"), "mechanics").unwrap();
        conn.execute("DELETE FROM exams WHERE id = 'E1'", []).unwrap();
        let units: i64 = conn
            .query_row("SELECT COUNT(*) FROM units", [], |row| row.get(0))
            .unwrap();
        assert_eq!(units, 0);
    }
}
