//! Path resolution for habitgrid configuration and data files.
//!
//! All data is stored in `~/.habitgrid/` unless overridden:
//! - `config.yaml` - Main configuration file
//! - `habitgrid.db` - SQLite database holding habits and completions
//! - `logs/` - Rotating log files

use std::path::PathBuf;

use crate::error::HabitError;

/// Environment variable that relocates the data directory.
pub const HOME_ENV: &str = "HABITGRID_HOME";

/// Paths to habitgrid configuration and data.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.habitgrid/`
    pub root: PathBuf,
    /// Config file: `~/.habitgrid/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.habitgrid/habitgrid.db`
    pub database: PathBuf,
    /// Log directory: `~/.habitgrid/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, HabitError> {
        let home = std::env::var("HOME").map_err(|_| {
            HabitError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".habitgrid")))
    }

    /// Use `root` if given, otherwise the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be
    /// determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, HabitError> {
        root.map_or_else(Self::new, |r| Ok(Self::with_root(r)))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("habitgrid.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), HabitError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    HabitError::Config(format!("Failed to create directory {}: {e}", dir.display()))
                })?;
            }
        }

        Ok(())
    }
}
