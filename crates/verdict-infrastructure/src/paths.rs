//! Unified path management for verdict configuration and log files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/verdict/           # Config directory
//! ├── config.toml              # Application configuration
//! └── logs/                    # Application logs
//!     └── verdict.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use verdict_core::error::{Result, VerdictError};

const APP_DIR_NAME: &str = "verdict";

/// Resolves verdict's on-disk locations.
///
/// A base directory can be injected, which tests use to stay inside a
/// temporary directory.
#[derive(Debug, Clone)]
pub struct VerdictPaths {
    base: Option<PathBuf>,
}

impl VerdictPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the verdict configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a config error when the platform config directory cannot be
    /// determined and no base directory was given.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| VerdictError::config("Cannot find the user config directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }
}
