//! Site assembly: one page per resolved package.
//!
//! The builder resolves package directories from a repository listing,
//! rejects layouts whose pages would collide on disk, then renders and
//! writes every page. The first render or write failure aborts the build.

mod collision;
mod metadata;
mod render;
mod writer;

pub use collision::check_collisions;
pub use metadata::{GoImport, GoSource, ImportMetadata, VCS_GIT};
pub use render::render_page;
pub use writer::{FsPageWriter, PAGE_FILE_NAME, PageWriter};

use std::path::PathBuf;

use serde::Serialize;

use crate::doclink::{DocLinkStrategy, Provider};
use crate::error::{Error, Result};
use crate::git::Snapshot;
use crate::resolver::{UnitPath, resolve_units};

/// Documentation site pages redirect to by default.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://godoc.org";

/// Options shared by every page of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Import path of the repository root (e.g., "example.org/myrepo")
    pub import_prefix: String,
    /// Repository URL written into the `go-import` tag
    pub repo_url: String,
    /// Documentation site base URL
    pub docs_base_url: String,
    /// Redirect browsers to the documentation page
    pub redirect: bool,
}

impl BuildOptions {
    pub fn new(import_prefix: impl Into<String>, repo_url: impl Into<String>) -> Self {
        Self {
            import_prefix: import_prefix.into(),
            repo_url: repo_url.into(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            redirect: true,
        }
    }

    pub fn with_docs_base_url(mut self, url: impl Into<String>) -> Self {
        self.docs_base_url = url.into();
        self
    }

    pub fn with_redirect(mut self, redirect: bool) -> Self {
        self.redirect = redirect;
        self
    }
}

/// One written page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub unit: UnitPath,
    pub import_path: String,
    pub path: PathBuf,
}

/// Outcome of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub import_prefix: String,
    /// Doc-link provider, when `go-source` tags were generated
    pub provider: Option<Provider>,
    pub pages: Vec<PageReport>,
}

/// Builds the pages for one repository snapshot.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    options: BuildOptions,
    doc_links: Option<DocLinkStrategy>,
}

impl SiteBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            doc_links: None,
        }
    }

    /// Emit `go-source` tags using `strategy` on every page.
    pub fn with_doc_links(mut self, strategy: DocLinkStrategy) -> Self {
        self.doc_links = Some(strategy);
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build pages for a fetched snapshot.
    pub fn build(&self, snapshot: &Snapshot, writer: &mut dyn PageWriter) -> Result<BuildReport> {
        self.build_from_listing(snapshot.listing(), writer)
    }

    /// Build pages from any fallible file listing.
    pub fn build_from_listing<I, P>(
        &self,
        listing: I,
        writer: &mut dyn PageWriter,
    ) -> Result<BuildReport>
    where
        I: IntoIterator<Item = Result<P>>,
        P: AsRef<str>,
    {
        let units = resolve_units(listing)?;
        check_collisions(&units)?;
        tracing::info!(
            packages = units.len(),
            prefix = %self.options.import_prefix,
            "Resolved package directories"
        );

        let mut pages = Vec::with_capacity(units.len());
        for unit in units {
            let page = self.build_page(&unit, writer)?;
            pages.push(page);
        }

        Ok(BuildReport {
            import_prefix: self.options.import_prefix.clone(),
            provider: self.doc_links.as_ref().map(DocLinkStrategy::provider),
            pages,
        })
    }

    fn build_page(&self, unit: &UnitPath, writer: &mut dyn PageWriter) -> Result<PageReport> {
        let options = &self.options;
        let meta = ImportMetadata::for_unit(
            unit,
            &options.import_prefix,
            &options.repo_url,
            &options.docs_base_url,
            options.redirect,
            self.doc_links.as_ref(),
        );
        let import_path = unit.join_onto(&options.import_prefix);

        let contents = render_page(&meta).map_err(|source| Error::Render {
            unit: unit.to_string(),
            source,
        })?;
        let path = writer.write_page(unit, &import_path, &contents)?;

        Ok(PageReport {
            unit: unit.clone(),
            import_path,
            path,
        })
    }
}
