//! Repository source specification.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which repository and branch to generate pages for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSpec {
    /// Repository URL (e.g., "https://github.com/org/repo")
    pub repo_url: String,
    /// Branch to fetch; `None` means the remote's default branch
    pub branch: Option<String>,
}

impl RepoSpec {
    /// Create a new RepoSpec for the remote's default branch.
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            branch: None,
        }
    }

    /// Set the branch to fetch. Empty names select the default branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        let branch = branch.into();
        self.branch = if branch.is_empty() { None } else { Some(branch) };
        self
    }

    pub fn uses_default_branch(&self) -> bool {
        self.branch.is_none()
    }

    /// Compute the bare repo directory path for this spec.
    pub fn bare_repo_dir(&self, state_dir: &Path) -> PathBuf {
        let hash = blake3::hash(self.repo_url.as_bytes()).to_hex().to_string();
        state_dir.join("git").join(format!("{}.git", hash))
    }
}
