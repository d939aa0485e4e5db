//! Outcomes of package operations, passes and whole runs.

/// Result of synchronizing a single package
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackageOutcome {
    /// Package was absent and has been cloned
    Cloned,
    /// Package was present and has been pulled
    Updated,
    /// Clone or pull failed; the package is eligible for retry
    Failed { reason: String },
    /// Pass was interrupted before a worker picked the package up
    Cancelled,
}

impl PackageOutcome {
    /// Returns the emoji symbol for this outcome
    pub fn symbol(&self) -> &str {
        match self {
            PackageOutcome::Cloned | PackageOutcome::Updated => "🟢",
            PackageOutcome::Cancelled => "🟠",
            PackageOutcome::Failed { .. } => "🔴",
        }
    }

    /// Returns the text representation of this outcome
    pub fn text(&self) -> &str {
        match self {
            PackageOutcome::Cloned => "cloned",
            PackageOutcome::Updated => "updated",
            PackageOutcome::Failed { .. } => "failed",
            PackageOutcome::Cancelled => "cancelled",
        }
    }
}

/// Summary of one pass of the worker pool
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Packages submitted to the pool
    pub attempted: usize,
    pub cloned: usize,
    pub updated: usize,
    /// Failed packages, in completion order
    pub failed: Vec<String>,
    /// Packages that never ran because of an interrupt
    pub cancelled: Vec<String>,
    /// Whether an interrupt arrived while the pool was running
    pub interrupted: bool,
}

impl PassReport {
    /// Nothing failed and no interrupt arrived
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.interrupted
    }
}

/// How a full run of the retry loop ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Every package succeeded after `passes` passes
    Completed { passes: usize },
    /// The retry policy declined while `failed` was still non-empty
    Abandoned { passes: usize, failed: Vec<String> },
    /// An interrupt stopped the run during pass number `passes`
    Interrupted { passes: usize },
}

impl SyncOutcome {
    pub fn passes(&self) -> usize {
        match self {
            SyncOutcome::Completed { passes }
            | SyncOutcome::Abandoned { passes, .. }
            | SyncOutcome::Interrupted { passes } => *passes,
        }
    }
}
