//! Shared helpers for tempod specs

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MINIMAL_SCHEDULE: &str = r#"
[[job]]
name = "heartbeat"
every = "30s"
command = "true"
"#;

/// A sandbox directory holding a schedule file
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a schedule file and return its path
    pub fn schedule(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("schedule.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }
}

pub fn tempod() -> Command {
    Command::cargo_bin("tempod").unwrap()
}
