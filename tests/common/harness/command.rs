//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since each test binary uses a different subset
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `syllabus` binary.
pub struct SyllabusCommand {
    args: Vec<String>,
    envs: Vec<(OsString, OsString)>,
    removed_envs: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl SyllabusCommand {
    /// Creates a new command for the `syllabus` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
            removed_envs: Vec::new(),
            current_dir: None,
        }
    }

    /// Sets the global `--db` option.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Removes an inherited environment variable.
    pub fn env_remove(mut self, key: impl Into<OsString>) -> Self {
        self.removed_envs.push(key.into());
        self
    }

    /// Runs the binary from `dir`.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("syllabus").expect("Failed to find syllabus binary");
        for key in &self.removed_envs {
            cmd.env_remove(key);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `load` command.
    pub fn load(self, file: &Path) -> Self {
        let file = file.to_string_lossy().to_string();
        self.args(["load", file.as_str()])
    }

    /// Configures for the `nav` command with a slug path.
    pub fn nav(self, path: &str) -> Self {
        self.args(["nav", path])
    }

    /// Configures for the `nav` command with a node id.
    pub fn nav_id(self, id: &str) -> Self {
        self.args(["nav", "--id", id])
    }

    /// Configures for the `walk` command.
    pub fn walk(self, exam: &str) -> Self {
        self.args(["walk", exam])
    }

    /// Configures for the `exams` command.
    pub fn exams(self) -> Self {
        self.args(["exams"])
    }

    /// Configures for the `activate` command.
    pub fn activate(self, path: &str) -> Self {
        self.args(["activate", path])
    }

    /// Configures for the `deactivate` command.
    pub fn deactivate(self, path: &str) -> Self {
        self.args(["deactivate", path])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format hrefs` to the command.
    pub fn format_hrefs(self) -> Self {
        self.args(["--format", "hrefs"])
    }
}

impl Default for SyllabusCommand {
    fn default() -> Self {
        Self::new()
    }
}
