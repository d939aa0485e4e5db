//! Pass execution and the retry loop.

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tokio::sync::{watch, Semaphore};

use crate::core::config::{MAX_JOBS, MIN_JOBS};
use crate::core::progress::PassProgress;
use crate::core::stats::PassStatistics;
use crate::core::sync::package::{sync_package, PackageAction, RemoteHost};
use crate::core::sync::policy::RetryPolicy;
use crate::core::sync::state::{PackageOutcome, PassReport, SyncOutcome};
use crate::git::VcsClient;

/// Batch synchronizer for a set of package repositories
///
/// Runs passes of a bounded worker pool over the packages and consults a
/// [`RetryPolicy`] whenever a pass leaves failures behind. Each retry pass
/// only covers the packages that failed in the pass before it.
pub struct Synchronizer<C> {
    client: C,
    root: PathBuf,
    host: RemoteHost,
    jobs: usize,
    show_progress: bool,
}

impl<C: VcsClient> Synchronizer<C> {
    /// Creates a synchronizer working in the current directory.
    /// `jobs` is clamped to the supported worker range.
    pub fn new(client: C, jobs: usize) -> Self {
        Self {
            client,
            root: PathBuf::from("."),
            host: RemoteHost::default(),
            jobs: jobs.clamp(MIN_JOBS as usize, MAX_JOBS as usize),
            show_progress: false,
        }
    }

    /// Directory the package checkouts live in
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_host(mut self, host: RemoteHost) -> Self {
        self.host = host;
        self
    }

    /// Draws progress bars and pass summaries on the terminal
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs passes until nothing fails, the policy declines, or `interrupt` fires.
    pub async fn run<P>(
        &self,
        packages: &[String],
        policy: &mut P,
        interrupt: &mut watch::Receiver<bool>,
    ) -> Result<SyncOutcome>
    where
        P: RetryPolicy + ?Sized,
    {
        let mut pending = packages.to_vec();
        let mut passes = 0;

        loop {
            passes += 1;
            let report = self.run_pass(passes, &pending, interrupt).await?;

            if report.interrupted {
                return Ok(SyncOutcome::Interrupted { passes });
            }
            if report.is_clean() {
                return Ok(SyncOutcome::Completed { passes });
            }

            let decision = tokio::select! {
                decision = policy.should_retry(&report.failed) => Some(decision?),
                _ = wait_for_interrupt(interrupt) => None,
            };

            match decision {
                None => return Ok(SyncOutcome::Interrupted { passes }),
                Some(false) => {
                    return Ok(SyncOutcome::Abandoned {
                        passes,
                        failed: report.failed,
                    })
                }
                Some(true) => {
                    tracing::info!(pass = passes + 1, count = report.failed.len(), "retrying failed packages");
                    pending = report.failed;
                }
            }
        }
    }

    /// Runs one pass over `packages` with at most `jobs` packages in flight.
    ///
    /// When `interrupt` fires the pool is closed: packages still waiting for
    /// a worker slot come back as cancelled, packages already running finish.
    pub async fn run_pass(
        &self,
        pass_number: usize,
        packages: &[String],
        interrupt: &mut watch::Receiver<bool>,
    ) -> Result<PassReport> {
        let start_time = Instant::now();
        let statistics = PassStatistics::new();
        let progress = if self.show_progress {
            PassProgress::new(pass_number, packages)?
        } else {
            PassProgress::hidden(packages)
        };
        let semaphore = Semaphore::new(self.jobs);

        tracing::debug!(pass = pass_number, packages = packages.len(), jobs = self.jobs, "starting pass");

        let mut interrupted = *interrupt.borrow();
        if interrupted {
            semaphore.close();
        }

        let mut pool = FuturesUnordered::new();
        for package in packages {
            let semaphore = &semaphore;
            let statistics = &statistics;
            let progress = &progress;

            pool.push(async move {
                let outcome = match semaphore.acquire().await {
                    Ok(_permit) => {
                        let action = PackageAction::for_package(&self.root, package);
                        progress.started(package, action.label());
                        sync_package(&self.client, &self.root, &self.host, package).await
                    }
                    Err(_) => PackageOutcome::Cancelled,
                };
                statistics.record(package, &outcome);
                progress.finished(package, &outcome);
            });
        }

        let mut watching = !interrupted;
        loop {
            tokio::select! {
                next = pool.next() => {
                    if next.is_none() {
                        break;
                    }
                }
                changed = interrupt.changed(), if watching => {
                    match changed {
                        Ok(()) if *interrupt.borrow() => {
                            tracing::warn!(pass = pass_number, "interrupted, cancelling queued packages");
                            interrupted = true;
                            watching = false;
                            semaphore.close();
                        }
                        Ok(()) => {}
                        // Sender gone: no interrupt can arrive any more
                        Err(_) => watching = false,
                    }
                }
            }
        }
        drop(pool);
        progress.finish();

        if self.show_progress && !interrupted {
            println!("{}", statistics.generate_summary(start_time.elapsed()));
            let detailed = statistics.generate_detailed_summary();
            if !detailed.is_empty() {
                println!("\n{}", "━".repeat(70));
                println!("{detailed}");
                println!("{}", "━".repeat(70));
            }
        }

        Ok(PassReport {
            attempted: packages.len(),
            cloned: statistics.cloned.load(Ordering::Relaxed) as usize,
            updated: statistics.updated.load(Ordering::Relaxed) as usize,
            failed: statistics.failed_packages(),
            cancelled: statistics.cancelled_packages(),
            interrupted,
        })
    }
}

/// Resolves once `interrupt` carries `true`; never resolves if the sender is gone
async fn wait_for_interrupt(interrupt: &mut watch::Receiver<bool>) {
    loop {
        if *interrupt.borrow_and_update() {
            return;
        }
        if interrupt.changed().await.is_err() {
            futures::future::pending::<()>().await;
        }
    }
}
