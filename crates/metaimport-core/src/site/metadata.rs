//! Per-package page metadata.

use serde::Serialize;

use crate::doclink::DocLinkStrategy;
use crate::resolver::UnitPath;

/// Version control system named in every `go-import` tag.
pub const VCS_GIT: &str = "git";

/// Contents of the `go-import` meta tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoImport {
    pub import_prefix: String,
    pub vcs: String,
    pub repo_root: String,
}

/// Contents of the `go-source` meta tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoSource {
    pub prefix: String,
    pub home: String,
    pub directory: String,
    pub file: String,
}

impl GoSource {
    pub fn new(prefix: impl Into<String>, strategy: &DocLinkStrategy) -> Self {
        Self {
            prefix: prefix.into(),
            home: strategy.home(),
            directory: strategy.directory(),
            file: strategy.file(),
        }
    }
}

/// Everything rendered into one package page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportMetadata {
    pub go_import: GoImport,
    /// Present only when doc links were requested
    pub go_source: Option<GoSource>,
    /// Documentation page for this package
    pub docs_url: String,
    /// Send browsers on to `docs_url`
    pub redirect: bool,
}

impl ImportMetadata {
    /// Metadata for `unit`.
    ///
    /// The `go-import` prefix is always the repository root prefix, never
    /// the package's own import path: `go get` then fetches the repository
    /// once instead of resolving every package path separately. See
    /// https://npf.io/2016/10/vanity-imports-with-hugo/.
    pub fn for_unit(
        unit: &UnitPath,
        import_prefix: &str,
        repo_url: &str,
        docs_base_url: &str,
        redirect: bool,
        doc_links: Option<&DocLinkStrategy>,
    ) -> Self {
        let import_path = unit.join_onto(import_prefix);
        Self {
            go_import: GoImport {
                import_prefix: import_prefix.to_string(),
                vcs: VCS_GIT.to_string(),
                repo_root: repo_url.to_string(),
            },
            go_source: doc_links.map(|strategy| GoSource::new(import_prefix, strategy)),
            docs_url: format!("{}/{}", docs_base_url.trim_end_matches('/'), import_path),
            redirect,
        }
    }
}
