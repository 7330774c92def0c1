//! Configuration file support.
//!
//! Every key is optional; command-line flags take precedence over the file,
//! and the file over built-in defaults.
//!
//! ```toml
//! output_dir = "public"
//! docs_base_url = "https://pkg.go.dev"
//! godoc = true
//! redirect = false
//! state_dir = "/var/cache/metaimport"
//! ```

pub mod parser;
pub mod paths;
mod store;

pub use store::ConfigStore;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory generated pages are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Documentation site pages link and redirect to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_base_url: Option<String>,

    /// Emit `go-source` tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub godoc: Option<bool>,

    /// Redirect browsers to the documentation page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<bool>,

    /// Where fetched repositories are cached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `other` on top of this config; set keys in `other` win.
    pub fn merge(&mut self, other: Config) {
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.docs_base_url.is_some() {
            self.docs_base_url = other.docs_base_url;
        }
        if other.godoc.is_some() {
            self.godoc = other.godoc;
        }
        if other.redirect.is_some() {
            self.redirect = other.redirect;
        }
        if other.state_dir.is_some() {
            self.state_dir = other.state_dir;
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(paths::DEFAULT_OUTPUT_DIR))
    }

    pub fn docs_base_url(&self) -> &str {
        self.docs_base_url
            .as_deref()
            .unwrap_or(crate::site::DEFAULT_DOCS_BASE_URL)
    }

    pub fn godoc(&self) -> bool {
        self.godoc.unwrap_or(false)
    }

    pub fn redirect(&self) -> bool {
        self.redirect.unwrap_or(true)
    }

    /// Configured state directory, else the platform cache directory.
    pub fn state_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::default_state_dir(),
        }
    }
}
