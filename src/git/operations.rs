//! Basic git command execution

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;

/// Git invocation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// The git binary could not be started
    #[error("Failed to run 'git {args}': {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    /// The command did not finish in time
    #[error("Git operation timed out after {secs} seconds: git {args}")]
    Timeout { args: String, secs: u64 },

    /// The command ran and exited non-zero
    #[error("'git {args}' failed: {stderr}")]
    CommandFailed { args: String, stderr: String },
}

/// Runs a git command in the specified directory with a timeout
/// Returns (success, stdout, stderr)
pub async fn run_git(path: &Path, args: &[&str]) -> Result<(bool, String, String), GitError> {
    run_git_with_timeout(path, args, Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS)).await
}

pub(crate) async fn run_git_with_timeout(
    path: &Path,
    args: &[&str],
    timeout_duration: Duration,
) -> Result<(bool, String, String), GitError> {
    tracing::debug!(dir = %path.display(), "git {}", args.join(" "));

    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout_duration, output).await {
        Ok(Ok(output)) => Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Ok(Err(source)) => Err(GitError::Spawn {
            args: args.join(" "),
            source,
        }),
        Err(_) => Err(GitError::Timeout {
            args: args.join(" "),
            secs: timeout_duration.as_secs(),
        }),
    }
}

/// Runs a git command and turns a non-zero exit into an error
pub async fn run_git_checked(path: &Path, args: &[&str]) -> Result<String, GitError> {
    run_git_checked_with_timeout(path, args, Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS)).await
}

pub(crate) async fn run_git_checked_with_timeout(
    path: &Path,
    args: &[&str],
    timeout_duration: Duration,
) -> Result<String, GitError> {
    match run_git_with_timeout(path, args, timeout_duration).await? {
        (true, stdout, _) => Ok(stdout),
        (false, _, stderr) => Err(GitError::CommandFailed {
            args: args.join(" "),
            stderr,
        }),
    }
}
