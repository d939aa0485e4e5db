//! Per-package clone-or-update operation.

use std::path::Path;

use crate::core::config::{DEFAULT_REMOTE_NAME, PACKAGES_HOST_DOMAIN, PACKAGES_ORGANIZATION};
use crate::core::stats::clean_error_message;
use crate::core::sync::state::PackageOutcome;
use crate::git::{RemoteDirection, VcsClient};

/// Hosting location of the package repositories
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteHost {
    pub domain: String,
    pub organization: String,
}

impl Default for RemoteHost {
    fn default() -> Self {
        Self::new(PACKAGES_HOST_DOMAIN, PACKAGES_ORGANIZATION)
    }
}

impl RemoteHost {
    pub fn new(domain: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            organization: organization.into(),
        }
    }

    /// Anonymous https URL used for cloning and fetching
    pub fn fetch_url(&self, package: &str) -> String {
        format!("https://{}/{}/{package}.git", self.domain, self.organization)
    }

    /// ssh URL used for pushing
    pub fn push_url(&self, package: &str) -> String {
        format!("git@{}:{}/{package}.git", self.domain, self.organization)
    }
}

/// Which operation a package needs, decided from the working directory
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageAction {
    Clone,
    Pull,
}

impl PackageAction {
    /// A package whose directory already exists is only ever pulled
    pub fn for_package(root: &Path, package: &str) -> Self {
        if root.join(package).exists() {
            PackageAction::Pull
        } else {
            PackageAction::Clone
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PackageAction::Clone => "cloning",
            PackageAction::Pull => "pulling",
        }
    }
}

/// Brings the working copy of `package` under `root` up to date.
///
/// Never fails: any client error is folded into [`PackageOutcome::Failed`].
/// A failed clone is not cleaned up.
pub async fn sync_package<C>(
    client: &C,
    root: &Path,
    host: &RemoteHost,
    package: &str,
) -> PackageOutcome
where
    C: VcsClient + ?Sized,
{
    let repo_path = root.join(package);

    match PackageAction::for_package(root, package) {
        PackageAction::Pull => match client.pull(&repo_path).await {
            Ok(()) => {
                tracing::info!(package, "updated");
                PackageOutcome::Updated
            }
            Err(e) => {
                tracing::debug!(package, error = %e, "pull failed");
                PackageOutcome::Failed {
                    reason: clean_error_message(&e.to_string()),
                }
            }
        },
        PackageAction::Clone => {
            let fetch_url = host.fetch_url(package);
            if let Err(e) = client.clone_repo(&fetch_url, &repo_path).await {
                tracing::debug!(package, error = %e, "clone failed");
                return PackageOutcome::Failed {
                    reason: clean_error_message(&e.to_string()),
                };
            }

            configure_remote(client, &repo_path, host, package).await;
            tracing::info!(package, "cloned");
            PackageOutcome::Cloned
        }
    }
}

/// Sets the fetch URL to https and the push URL to ssh.
/// Failures here leave the clone usable, so they are only logged.
async fn configure_remote<C>(client: &C, repo_path: &Path, host: &RemoteHost, package: &str)
where
    C: VcsClient + ?Sized,
{
    let urls = [
        (RemoteDirection::Fetch, host.fetch_url(package)),
        (RemoteDirection::Push, host.push_url(package)),
    ];
    for (direction, url) in urls {
        if let Err(e) = client
            .set_remote_url(repo_path, DEFAULT_REMOTE_NAME, &url, direction)
            .await
        {
            tracing::warn!(package, ?direction, error = %e, "could not set remote url");
        }
    }
}
