//! Metaimport Core Library
//!
//! Generates static `go-import` / `go-source` pages for every Go package
//! directory found in a remote Git repository, so the packages can be
//! fetched under a vanity import prefix.

pub mod config;
pub mod doclink;
pub mod error;
pub mod git;
pub mod resolver;
pub mod site;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{Config, ConfigStore};

    // Resolution
    pub use crate::resolver::{UnitPath, UnitSet, resolve_paths, resolve_units};

    // Doc links
    pub use crate::doclink::{DocLinkStrategy, Provider};

    // Fetching
    pub use crate::git::{FetchResult, GitFetcher, RepoSpec, Snapshot};

    // Site assembly
    pub use crate::site::{
        BuildOptions, BuildReport, FsPageWriter, ImportMetadata, PageWriter, SiteBuilder,
    };
}
