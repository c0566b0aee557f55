//! Configuration loading and management
//!
//! Handles parsing of `.ticklist.toml` configuration files.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::todo::DEFAULT_SEED;

pub const CONFIG_FILE: &str = ".ticklist.toml";
const MIN_NARROW_WIDTH: u16 = 40;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Tasks every session starts with
    #[serde(default = "default_seed")]
    pub seed: Vec<String>,

    /// Terminal UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            ui: UiConfig::default(),
        }
    }
}

fn default_seed() -> Vec<String> {
    DEFAULT_SEED.iter().map(|task| task.to_string()).collect()
}

/// Terminal UI configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UiConfig {
    /// Below this width the list and detail panes are shown one at a time
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,
}

fn default_narrow_width() -> u16 {
    90
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            narrow_width: default_narrow_width(),
        }
    }
}

impl Config {
    /// Load configuration from a `.ticklist.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a session.
    ///
    /// An explicit path must exist. Otherwise the working directory is tried,
    /// then the user config directory, then defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            return Self::load(path);
        }

        let candidates = [Some(cwd.join(CONFIG_FILE)), user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if let Some(pos) = self.seed.iter().position(|task| task.is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "seed[{pos}]: task cannot be empty"
            )));
        }
        if self.ui.narrow_width < MIN_NARROW_WIDTH {
            return Err(Error::InvalidConfig(format!(
                "ui.narrow_width must be >= {MIN_NARROW_WIDTH}"
            )));
        }
        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ticklist").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(
            cfg.seed,
            vec![
                "Learn about Angular".to_string(),
                "Use the CLI".to_string(),
                "Profit!".to_string()
            ]
        );
        assert_eq!(cfg.ui.narrow_width, 90);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
seed = ["Write tests", "Ship it"]

[ui]
narrow_width = 120
"#,
        )
        .expect("write");

        let cfg = Config::load(&path).expect("load");
        assert_eq!(cfg.seed, vec!["Write tests".to_string(), "Ship it".to_string()]);
        assert_eq!(cfg.ui.narrow_width, 120);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = [\"only\"]\n").expect("write");

        let cfg = Config::load(&path).expect("load");
        assert_eq!(cfg.seed, vec!["only".to_string()]);
        assert_eq!(cfg.ui.narrow_width, 90);
    }

    #[test]
    fn empty_seed_task_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "seed = [\"ok\", \"\"]\n").expect("write");

        let err = Config::load(&path).expect_err("invalid");
        assert!(matches!(err, Error::InvalidConfig(msg) if msg.contains("seed[1]")));
    }

    #[test]
    fn narrow_width_floor_enforced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[ui]\nnarrow_width = 10\n").expect("write");

        assert!(matches!(Config::load(&path), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn discover_prefers_working_directory_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "seed = [\"local\"]\n").expect("write");

        let cfg = Config::discover(None, dir.path()).expect("discover");
        assert_eq!(cfg.seed, vec!["local".to_string()]);
    }

    #[test]
    fn discover_missing_explicit_path_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let err = Config::discover(Some(&missing), dir.path()).expect_err("missing");
        assert!(matches!(err, Error::ConfigNotFound(path) if path == missing));
    }
}
