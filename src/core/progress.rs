//! Progress bar management for synchronization passes

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use super::config::{PROGRESS_CHARS, PROGRESS_TEMPLATE};
use crate::core::sync::PackageOutcome;

/// Progress display for one pass of the worker pool
///
/// Wraps a single bar sized to the number of packages in the pass. Finished
/// packages are printed above the bar so the bar itself stays at the bottom.
pub struct PassProgress {
    bar: ProgressBar,
    name_width: usize,
}

impl PassProgress {
    /// Creates the progress display for a pass over `packages`
    pub fn new(pass_number: usize, packages: &[String]) -> Result<Self> {
        let bar = ProgressBar::new(packages.len() as u64);
        bar.set_style(create_progress_style()?);
        bar.set_prefix(format!("🚀 pass {pass_number}"));
        let name_width = packages.iter().map(String::len).max().unwrap_or(0);
        Ok(Self { bar, name_width })
    }

    /// Progress display that draws nothing, for library callers and tests
    pub fn hidden(packages: &[String]) -> Self {
        let name_width = packages.iter().map(String::len).max().unwrap_or(0);
        Self {
            bar: ProgressBar::hidden(),
            name_width,
        }
    }

    /// Notes that a worker picked up `package`
    pub fn started(&self, package: &str, operation: &str) {
        self.bar.set_message(format!("{operation} {package}"));
    }

    /// Prints the result line for `package` and advances the bar
    pub fn finished(&self, package: &str, outcome: &PackageOutcome) {
        let line = match outcome {
            PackageOutcome::Failed { reason } => format!(
                "{} {:width$}  {:<10} {reason}",
                outcome.symbol(),
                package,
                outcome.text(),
                width = self.name_width
            ),
            _ => format!(
                "{} {:width$}  {}",
                outcome.symbol(),
                package,
                outcome.text(),
                width = self.name_width
            ),
        };
        if !matches!(outcome, PackageOutcome::Cancelled) {
            self.bar.println(line);
        }
        self.bar.inc(1);
    }

    /// Clears the bar once the pass has drained
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Creates a progress bar style configuration
/// Returns a ProgressStyle configured with the application's visual styling
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)?
        .progress_chars(PROGRESS_CHARS))
}
