#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use assert_cmd::Command;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use ticklist::todo::{FixedClock, TodoStore, DEFAULT_SEED};

/// A scratch working directory with no config of its own.
pub struct Workdir {
    dir: TempDir,
}

impl Workdir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".ticklist.toml", contents)
    }

    /// The binary, run from this directory with user config isolated.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ticklist").expect("binary");
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("HOME", self.path())
            .env_remove("TICKLIST_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    ))
}

/// The three default todos, all open, ids 1..=3.
pub fn seeded_store() -> TodoStore {
    TodoStore::with_seed(fixed_clock(), DEFAULT_SEED)
}
