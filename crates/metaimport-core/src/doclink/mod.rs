//! Browse-source links for the `go-source` meta tag.
//!
//! Each hosting provider has its own URL layout for browsing a directory or
//! a file line. See https://github.com/golang/gddo/wiki/Source-Code-Links
//! for the template syntax (`{/dir}`, `{file}`, `{line}`).
//!
//! GitHub:
//!   directory: https://github.com/go-yaml/yaml/tree/<branch>/some/directory
//!   file:      https://github.com/go-yaml/yaml/tree/<branch>/some/directory/file#L42
//!              (GitHub redirects `/tree/` file URLs to `/blob/`)
//!
//! Bitbucket URLs embed a commit hash, but `HEAD` may stand in for the head
//! of the default branch. Those links are therefore only correct when the
//! generated pages describe the default branch.

mod select;

pub use select::{select, short_branch};

use serde::Serialize;

/// Placeholder telling godoc there is no home page beyond the import page.
pub const NO_HOME: &str = "_";

/// Recognized hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    GitHub,
    Bitbucket,
    /// Unrecognized host, or a provider whose preconditions were not met.
    Default,
}

impl Provider {
    /// Host name the provider serves repositories from.
    pub fn host(self) -> Option<&'static str> {
        match self {
            Provider::GitHub => Some("github.com"),
            Provider::Bitbucket => Some("bitbucket.org"),
            Provider::Default => None,
        }
    }

    pub fn from_host(host: &str) -> Self {
        [Provider::GitHub, Provider::Bitbucket]
            .into_iter()
            .find(|p| p.host().is_some_and(|h| h.eq_ignore_ascii_case(host)))
            .unwrap_or(Provider::Default)
    }
}

/// URL templates for one repository, chosen once per build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocLinkStrategy {
    GitHub { repo_url: String, branch: String },
    Bitbucket { repo_url: String },
    Default { repo_url: String },
}

impl DocLinkStrategy {
    pub fn provider(&self) -> Provider {
        match self {
            DocLinkStrategy::GitHub { .. } => Provider::GitHub,
            DocLinkStrategy::Bitbucket { .. } => Provider::Bitbucket,
            DocLinkStrategy::Default { .. } => Provider::Default,
        }
    }

    pub fn repo_url(&self) -> &str {
        match self {
            DocLinkStrategy::GitHub { repo_url, .. }
            | DocLinkStrategy::Bitbucket { repo_url }
            | DocLinkStrategy::Default { repo_url } => repo_url,
        }
    }

    /// Home page URL, or [`NO_HOME`].
    pub fn home(&self) -> String {
        match self {
            DocLinkStrategy::GitHub { .. } | DocLinkStrategy::Bitbucket { .. } => {
                NO_HOME.to_string()
            }
            DocLinkStrategy::Default { repo_url } => repo_url.clone(),
        }
    }

    /// Directory browse template containing `{/dir}`.
    pub fn directory(&self) -> String {
        match self {
            DocLinkStrategy::GitHub { repo_url, branch } => {
                format!("{}/tree/{}{{/dir}}", repo_url, branch)
            }
            DocLinkStrategy::Bitbucket { repo_url } => format!("{}/src/HEAD{{/dir}}", repo_url),
            DocLinkStrategy::Default { repo_url } => repo_url.clone(),
        }
    }

    /// File-and-line browse template containing `{/dir}`, `{file}` and `{line}`.
    pub fn file(&self) -> String {
        match self {
            DocLinkStrategy::GitHub { repo_url, branch } => {
                format!("{}/tree/{}{{/dir}}/{{file}}#L{{line}}", repo_url, branch)
            }
            DocLinkStrategy::Bitbucket { repo_url } => format!(
                "{}/src/HEAD{{/dir}}/{{file}}?fileviewer=file-view-default#{{file}}-{{line}}",
                repo_url
            ),
            DocLinkStrategy::Default { repo_url } => repo_url.clone(),
        }
    }
}
