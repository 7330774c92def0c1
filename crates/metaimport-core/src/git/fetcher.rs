//! Git fetcher producing a file listing of one branch head.

use std::path::{Path, PathBuf};

use anyhow::Context;
use git2::{Direction, ObjectType, Repository, TreeWalkMode, TreeWalkResult};

use super::RepoSpec;
use crate::doclink::short_branch;
use crate::error::Error;

/// Files in the tree of one commit, as slash-separated paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Commit the listing was taken from
    pub commit: String,
    /// Every blob path in the commit's tree
    pub files: Vec<String>,
}

impl Snapshot {
    /// Walk the tree of `commit` and record every blob path.
    pub fn read_tree(commit: &git2::Commit) -> Result<Self, Error> {
        let tree = commit
            .tree()
            .map_err(|e| Error::snapshot_read(format!("reading tree of {}: {}", commit.id(), e)))?;

        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            // Submodules (commits) and directories are not files.
            if entry.kind() != Some(ObjectType::Blob) {
                return TreeWalkResult::Ok;
            }
            match entry.name() {
                Some(name) => files.push(format!("{}{}", root, name)),
                None => tracing::debug!(
                    dir = %root,
                    name = %String::from_utf8_lossy(entry.name_bytes()),
                    "Skipping non-UTF-8 file name"
                ),
            }
            TreeWalkResult::Ok
        })
        .map_err(|e| Error::snapshot_read(format!("walking tree of {}: {}", commit.id(), e)))?;

        tracing::debug!(commit = %commit.id(), files = files.len(), "Read repository tree");
        Ok(Self {
            commit: commit.id().to_string(),
            files,
        })
    }

    /// The listing as a fallible iterator, as consumed by the resolver.
    pub fn listing(&self) -> impl Iterator<Item = Result<&str, Error>> {
        self.files.iter().map(|f| Ok(f.as_str()))
    }
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Listing of the fetched branch head
    pub snapshot: Snapshot,
    /// Short name of the branch that was fetched
    pub branch: String,
    /// Short name of the remote's default branch, if it reported one
    pub default_branch: Option<String>,
    /// Whether the default branch was fetched because none was requested
    pub used_default_branch: bool,
}

impl FetchResult {
    /// The branch that was explicitly asked for, or `None` when the remote's
    /// default branch was fetched.
    pub fn requested_branch(&self) -> Option<&str> {
        (!self.used_default_branch).then_some(self.branch.as_str())
    }
}

/// Fetches repositories into a bare cache and lists branch heads.
#[derive(Debug)]
pub struct GitFetcher {
    state_dir: PathBuf,
}

impl GitFetcher {
    /// Create a new GitFetcher with the given state directory.
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Fetch the requested (or default) branch and list its files.
    pub fn fetch(&self, spec: &RepoSpec) -> anyhow::Result<FetchResult> {
        let bare_dir = spec.bare_repo_dir(&self.state_dir);
        let repo = Self::ensure_bare_repo(&bare_dir)?;

        let mut remote = repo
            .remote_anonymous(&spec.repo_url)
            .with_context(|| format!("Invalid repository URL: {}", spec.repo_url))?;

        remote
            .connect(Direction::Fetch)
            .with_context(|| format!("Failed to connect to {}", spec.repo_url))?;
        let default_branch = match remote.default_branch() {
            Ok(buf) => buf.as_str().map(|s| short_branch(s).to_string()),
            Err(err) => {
                tracing::debug!(url = %spec.repo_url, error = %err, "Remote reported no default branch");
                None
            }
        };
        let advertised: Vec<String> = remote
            .list()
            .with_context(|| format!("Failed to list references of {}", spec.repo_url))?
            .iter()
            .map(|head| head.name().to_string())
            .collect();
        remote
            .disconnect()
            .with_context(|| format!("Failed to disconnect from {}", spec.repo_url))?;

        let branch = match spec.branch.as_deref() {
            Some(requested) => short_branch(requested).to_string(),
            None => default_branch.clone().ok_or_else(|| {
                anyhow::anyhow!("Remote {} did not report a default branch", spec.repo_url)
            })?,
        };

        // Cached tracking refs outlive branches deleted on the remote.
        let remote_ref = format!("refs/heads/{}", branch);
        if !advertised.contains(&remote_ref) {
            anyhow::bail!("Branch {} not found in {}", branch, spec.repo_url);
        }

        let tracking_ref = format!("refs/remotes/origin/{}", branch);
        let refspec = format!("+{}:{}", remote_ref, tracking_ref);
        tracing::info!(url = %spec.repo_url, branch = %branch, "Fetching repository");
        remote
            .fetch(&[refspec.as_str()], None, None)
            .with_context(|| format!("Failed to fetch branch {} from {}", branch, spec.repo_url))?;

        let commit = repo
            .find_reference(&tracking_ref)
            .and_then(|r| r.peel_to_commit())
            .with_context(|| format!("Branch {} not found in {}", branch, spec.repo_url))?;

        let snapshot = Snapshot::read_tree(&commit)?;

        Ok(FetchResult {
            snapshot,
            branch,
            default_branch,
            used_default_branch: spec.uses_default_branch(),
        })
    }

    /// Open the cached bare repository, creating it if missing.
    fn ensure_bare_repo(bare_dir: &Path) -> anyhow::Result<Repository> {
        if bare_dir.exists() {
            return Repository::open_bare(bare_dir).with_context(|| {
                format!("Failed to open cached repository: {}", bare_dir.display())
            });
        }

        std::fs::create_dir_all(bare_dir).with_context(|| {
            format!("Failed to create git cache directory: {}", bare_dir.display())
        })?;
        Repository::init_bare(bare_dir).with_context(|| {
            format!("Failed to initialize cached repository: {}", bare_dir.display())
        })
    }
}
