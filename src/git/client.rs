//! Version-control client abstraction
//!
//! The synchronizer only needs three operations from the version-control
//! tool. They sit behind [`VcsClient`] so the retry loop can be driven by a
//! fake in tests instead of the network-bound `git` binary.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use super::operations::{run_git_checked_with_timeout, GitError};
use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;

/// Which side of a remote a URL applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteDirection {
    Fetch,
    Push,
}

/// The operations the synchronizer performs against a version-control tool
///
/// Success or failure is the only signal; output is diagnostic.
#[async_trait]
pub trait VcsClient: Send + Sync {
    /// Clones `url` into the new directory `dest`
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError>;

    /// Pulls the current branch of the working copy at `repo`
    async fn pull(&self, repo: &Path) -> Result<(), GitError>;

    /// Points `remote`'s fetch or push URL at `url`
    async fn set_remote_url(
        &self,
        repo: &Path,
        remote: &str,
        url: &str,
        direction: RemoteDirection,
    ) -> Result<(), GitError>;
}

/// [`VcsClient`] backed by the `git` executable on `PATH`
#[derive(Clone, Copy, Debug)]
pub struct GitCli {
    timeout: Duration,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS),
        }
    }

    /// Limit for a single git invocation
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn git(&self, path: &Path, args: &[&str]) -> Result<String, GitError> {
        run_git_checked_with_timeout(path, args, self.timeout).await
    }
}

#[async_trait]
impl VcsClient for GitCli {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        // Relative destinations resolve against the process working directory
        let dest_arg = dest.to_string_lossy();
        let existed = dest.exists();
        let result = self.git(Path::new("."), &["clone", "--quiet", url, &dest_arg]).await;

        // git is killed on timeout and leaves its partial checkout behind
        if let Err(GitError::Timeout { .. }) = &result {
            if !existed {
                if let Err(e) = tokio::fs::remove_dir_all(dest).await {
                    if e.kind() != ErrorKind::NotFound {
                        tracing::warn!(dest = %dest.display(), error = %e, "failed to remove partial clone");
                    }
                }
            }
        }
        result.map(|_| ())
    }

    async fn pull(&self, repo: &Path) -> Result<(), GitError> {
        self.git(repo, &["pull", "--quiet"]).await?;
        Ok(())
    }

    async fn set_remote_url(
        &self,
        repo: &Path,
        remote: &str,
        url: &str,
        direction: RemoteDirection,
    ) -> Result<(), GitError> {
        let args: Vec<&str> = match direction {
            RemoteDirection::Fetch => vec!["remote", "set-url", remote, url],
            RemoteDirection::Push => vec!["remote", "set-url", "--push", remote, url],
        };
        self.git(repo, &args).await?;
        Ok(())
    }
}
