//! In-memory VCS client for driving the synchronizer without git

use async_trait::async_trait;
use clone_all::git::{GitError, RemoteDirection, VcsClient};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

/// A recorded client call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FakeCall {
    Clone { url: String, package: String },
    Pull { package: String },
    SetRemoteUrl {
        package: String,
        remote: String,
        url: String,
        direction: RemoteDirection,
    },
}

/// Records calls and fails on demand.
///
/// A successful clone creates the destination directory, so a later pass
/// sees the package as present just like with real git.
#[derive(Default)]
pub struct FakeVcs {
    calls: Mutex<Vec<FakeCall>>,
    failures: Mutex<HashMap<String, usize>>,
    remote_failures: bool,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    pub started: Notify,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails clone/pull of `package` the next `times` attempts
    pub fn failing(self, package: &str, times: usize) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(package.to_string(), times);
        self
    }

    /// Fails clone/pull of `package` on every attempt
    pub fn always_failing(self, package: &str) -> Self {
        self.failing(package, usize::MAX)
    }

    pub fn with_remote_failures(mut self) -> Self {
        self.remote_failures = true;
        self
    }

    /// Makes clone and pull take `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of clone or pull attempts made for `package`
    pub fn attempts(&self, package: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| match call {
                FakeCall::Clone { package: p, .. } | FakeCall::Pull { package: p } => p == package,
                FakeCall::SetRemoteUrl { .. } => false,
            })
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn work(&self, package: &str) -> Result<(), GitError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.started.notify_one();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let fail = {
            let mut failures = self.failures.lock().unwrap();
            match failures.get_mut(package) {
                Some(remaining) if *remaining > 0 => {
                    if *remaining != usize::MAX {
                        *remaining -= 1;
                    }
                    true
                }
                _ => false,
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if fail {
            Err(GitError::CommandFailed {
                args: format!("fake {package}"),
                stderr: "fatal: simulated failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn package_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl VcsClient for FakeVcs {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let package = package_of(dest);
        self.calls.lock().unwrap().push(FakeCall::Clone {
            url: url.to_string(),
            package: package.clone(),
        });
        self.work(&package).await?;
        std::fs::create_dir_all(dest).map_err(|source| GitError::Spawn {
            args: "fake clone".to_string(),
            source,
        })
    }

    async fn pull(&self, repo: &Path) -> Result<(), GitError> {
        let package = package_of(repo);
        self.calls.lock().unwrap().push(FakeCall::Pull {
            package: package.clone(),
        });
        self.work(&package).await
    }

    async fn set_remote_url(
        &self,
        repo: &Path,
        remote: &str,
        url: &str,
        direction: RemoteDirection,
    ) -> Result<(), GitError> {
        self.calls.lock().unwrap().push(FakeCall::SetRemoteUrl {
            package: package_of(repo),
            remote: remote.to_string(),
            url: url.to_string(),
            direction,
        });
        if self.remote_failures {
            return Err(GitError::CommandFailed {
                args: "remote set-url".to_string(),
                stderr: "error: No such remote 'origin'".to_string(),
            });
        }
        Ok(())
    }
}

/// Creates `<root>/<name>` directories standing in for existing checkouts
pub fn existing_checkouts(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = root.join(name);
            std::fs::create_dir_all(&path).unwrap();
            path
        })
        .collect()
}
