//! Isolated test environment with temp directory.

use super::{SyllabusCommand, TestOutline};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary working directory.
///
/// Holds the database, outline files, and a private config home so the
/// user's own `config.toml` never leaks into a test.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        std::fs::create_dir_all(root.join("config")).expect("Failed to create config home");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the SQLite database used by `cmd()`.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("syllabus.db")
    }

    /// Returns the directory used as `XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Writes `config.toml` under the private config home.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.config_home().join("syllabus");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Writes a file to the environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes `outline` as JSON and loads it through the CLI.
    pub fn load(&self, outline: &TestOutline) -> PathBuf {
        let path = self.write_file("outline.json", &outline.to_json());
        self.cmd().load(&path).assert().success();
        path
    }

    /// Creates a SyllabusCommand bound to this environment's database.
    pub fn cmd(&self) -> SyllabusCommand {
        SyllabusCommand::new()
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("HOME", &self.root)
            .env_remove("RUST_LOG")
            .db(&self.db_path())
    }

    /// Like `cmd()` but without `--db`, so config and defaults apply.
    pub fn bare_cmd(&self) -> SyllabusCommand {
        SyllabusCommand::new()
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("HOME", &self.root)
            .env_remove("RUST_LOG")
            .current_dir(&self.root)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
