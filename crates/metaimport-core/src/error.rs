//! Error types for site generation.

use std::path::PathBuf;

/// Result type for metaimport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a site build.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read repository listing: {0}")]
    SnapshotRead(String),

    #[error("Package {unit:?} would be written inside the page of package {owner:?}")]
    OutputCollision { unit: String, owner: String },

    #[error("Import path {import_path:?} has a '.' or '..' segment")]
    InvalidImportPath { import_path: String },

    #[error("Failed to render page for {unit}: {source}")]
    Render {
        unit: String,
        #[source]
        source: std::fmt::Error,
    },

    #[error("Failed to write page for {unit} to {}: {source}", .path.display())]
    Write {
        unit: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn snapshot_read(message: impl Into<String>) -> Self {
        Self::SnapshotRead(message.into())
    }
}
