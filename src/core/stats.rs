//! Statistics tracking for a synchronization pass

use crate::core::config::{ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH};
use crate::core::sync::PackageOutcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Statistics for one pass of the worker pool
///
/// Workers record into this concurrently. Counters are atomic; the failed
/// and cancelled name lists sit behind a Mutex so no append is ever lost.
#[derive(Debug)]
pub struct PassStatistics {
    pub cloned: AtomicU64,
    pub updated: AtomicU64,
    pub failed_count: AtomicU64,
    pub failed: Mutex<Vec<(String, String)>>, // (package, reason)
    pub cancelled: Mutex<Vec<String>>,
}

impl Default for PassStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl PassStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self {
            cloned: AtomicU64::new(0),
            updated: AtomicU64::new(0),
            failed_count: AtomicU64::new(0),
            failed: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
        }
    }

    /// Records the outcome of a single package
    pub fn record(&self, package: &str, outcome: &PackageOutcome) {
        match outcome {
            PackageOutcome::Cloned => {
                self.cloned.fetch_add(1, Ordering::Relaxed);
            }
            PackageOutcome::Updated => {
                self.updated.fetch_add(1, Ordering::Relaxed);
            }
            PackageOutcome::Failed { reason } => {
                self.failed_count.fetch_add(1, Ordering::Relaxed);
                match self.failed.lock() {
                    Ok(mut guard) => guard.push((package.to_string(), reason.clone())),
                    Err(poisoned) => poisoned
                        .into_inner()
                        .push((package.to_string(), reason.clone())),
                }
            }
            PackageOutcome::Cancelled => {
                match self.cancelled.lock() {
                    Ok(mut guard) => guard.push(package.to_string()),
                    Err(poisoned) => poisoned.into_inner().push(package.to_string()),
                }
            }
        }
    }

    /// Names of the packages that failed during this pass, in completion order
    pub fn failed_packages(&self) -> Vec<String> {
        self.failed_with_reasons()
            .into_iter()
            .map(|(package, _)| package)
            .collect()
    }

    /// Failed packages paired with their cleaned-up error message
    pub fn failed_with_reasons(&self) -> Vec<(String, String)> {
        match self.failed.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Names of the packages that never ran because the pass was interrupted
    pub fn cancelled_packages(&self) -> Vec<String> {
        match self.cancelled.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Generates the one-line summary printed at the end of a pass
    pub fn generate_summary(&self, duration: Duration) -> String {
        let cloned = self.cloned.load(Ordering::Relaxed);
        let updated = self.updated.load(Ordering::Relaxed);
        let failed = self.failed_count.load(Ordering::Relaxed);

        if failed > 0 {
            format!(
                "✅ Completed in {:.1}s • {cloned} cloned • {updated} updated • {failed} failed",
                duration.as_secs_f64()
            )
        } else {
            format!(
                "✅ Completed in {:.1}s • {cloned} cloned • {updated} updated",
                duration.as_secs_f64()
            )
        }
    }

    /// Generates the tree-style listing of failures, empty when nothing failed
    pub fn generate_detailed_summary(&self) -> String {
        let failed = self.failed_with_reasons();
        if failed.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(failed.len() + 1);
        lines.push(format!("🔴 FAILED PACKAGES ({})", failed.len()));
        let width = failed.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (i, (package, reason)) in failed.iter().enumerate() {
            let tree_char = if i == failed.len() - 1 { "└─" } else { "├─" };
            lines.push(format!("   {tree_char} {package:width$}  # {reason}"));
        }
        lines.join("\n")
    }
}

/// Cleans and formats git error output for display
pub fn clean_error_message(error: &str) -> String {
    let cleaned = error
        .replace('\n', " ")
        .replace('\r', "")
        .replace('\t', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    let message = if cleaned.contains("timed out") {
        "timeout".to_string()
    } else if cleaned.contains("Repository not found") || cleaned.contains("not found") {
        "repository not found".to_string()
    } else if cleaned.contains("Authentication failed") || cleaned.contains("Permission denied") {
        "authentication failed".to_string()
    } else if cleaned.contains("conflict") || cleaned.contains("diverged") {
        "merge conflict".to_string()
    } else if cleaned.contains("Could not resolve host") || cleaned.contains("Connection") {
        "network error".to_string()
    } else {
        cleaned
    };

    if message.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = message.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    } else {
        message
    }
}
