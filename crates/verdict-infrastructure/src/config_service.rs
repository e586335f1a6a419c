//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`. A missing file yields
//! the defaults; `load_or_create` also writes them out for the user to edit.

use std::path::{Path, PathBuf};

use verdict_core::config::RootConfig;
use verdict_core::error::Result;

use crate::paths::VerdictPaths;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the default `config.toml` location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(VerdictPaths::new(None).config_file()?))
    }

    /// Creates a service reading the given file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, falling back to defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the file exists but cannot be read, and a
    /// serialization error when it is not valid TOML.
    pub async fn load(&self) -> Result<RootConfig> {
        if !tokio::fs::try_exists(&self.path).await? {
            tracing::debug!("[ConfigService] {} not found, using defaults", self.path.display());
            return Ok(RootConfig::default());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the configuration, writing the defaults first when the file is missing.
    pub async fn load_or_create(&self) -> Result<RootConfig> {
        if !tokio::fs::try_exists(&self.path).await? {
            let config = RootConfig::default();
            self.save(&config).await?;
            tracing::info!("[ConfigService] Created default config at {}", self.path.display());
            return Ok(config);
        }
        self.load().await
    }

    pub async fn save(&self, config: &RootConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(config)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}
