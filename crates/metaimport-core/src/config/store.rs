//! Config store for locating and loading config.toml.

use std::path::{Path, PathBuf};

use super::{Config, parser, paths};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: Option<PathBuf>,
    required: bool,
}

impl ConfigStore {
    /// Use the platform default location; a missing file is not an error.
    pub fn discover() -> Self {
        Self {
            config_path: paths::default_config_path(),
            required: false,
        }
    }

    /// Use an explicitly named file, which must exist.
    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(config_path.into()),
            required: true,
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn load(&self) -> anyhow::Result<Config> {
        let Some(path) = &self.config_path else {
            return Ok(Config::new());
        };
        if !path.exists() {
            if self.required {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            tracing::debug!(path = %path.display(), "No config file");
            return Ok(Config::new());
        }
        tracing::debug!(path = %path.display(), "Loading config file");
        parser::parse_config_file(path)
    }
}
