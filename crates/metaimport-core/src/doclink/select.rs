//! Choosing a doc-link strategy for a repository URL.

use url::Url;

use super::{DocLinkStrategy, Provider};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Branch used for GitHub links when the remote reported no default branch.
const FALLBACK_BRANCH: &str = "HEAD";

/// Strip the `refs/heads/` qualifier from a branch name.
pub fn short_branch(name: &str) -> &str {
    name.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(name)
}

/// Pick the doc-link strategy for `repo_url`.
///
/// `requested_branch` is `None` when the remote's default branch was
/// fetched. `remote_default_branch` is the default branch reported by the
/// remote, short or ref-qualified. Never fails: unknown hosts, unparsable
/// URLs and unmet preconditions all yield [`DocLinkStrategy::Default`].
pub fn select(
    repo_url: &str,
    requested_branch: Option<&str>,
    remote_default_branch: Option<&str>,
) -> DocLinkStrategy {
    let requested = requested_branch.map(short_branch);
    let remote_default = remote_default_branch.map(short_branch);
    let used_default_branch = requested.is_none();
    let repo_url = repo_url.to_string();

    let host = match Url::parse(&repo_url) {
        Ok(url) => url.host_str().map(str::to_owned),
        Err(err) => {
            tracing::debug!(url = %repo_url, error = %err, "Repository URL is not parsable");
            None
        }
    };
    let provider = host
        .as_deref()
        .map(Provider::from_host)
        .unwrap_or(Provider::Default);

    match provider {
        Provider::GitHub => {
            let branch = requested
                .or(remote_default)
                .unwrap_or(FALLBACK_BRANCH)
                .to_string();
            DocLinkStrategy::GitHub { repo_url, branch }
        }
        Provider::Bitbucket => {
            if used_default_branch || requested == remote_default {
                DocLinkStrategy::Bitbucket { repo_url }
            } else {
                tracing::warn!(
                    branch = requested.unwrap_or_default(),
                    "Bitbucket links only describe the default branch; using plain repository links"
                );
                DocLinkStrategy::Default { repo_url }
            }
        }
        Provider::Default => DocLinkStrategy::Default { repo_url },
    }
}
