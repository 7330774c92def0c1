//! Git operations for listing the files of a repository branch.
//!
//! Repositories are fetched into a bare cache under the state directory,
//! keyed by a hash of the repository URL, so repeated runs only transfer
//! new objects.

mod fetcher;
mod spec;

pub use fetcher::{FetchResult, GitFetcher, Snapshot};
pub use spec::RepoSpec;
