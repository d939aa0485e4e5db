//! Archived package cleanup command implementation
//!
//! Finds local checkouts of repositories that were archived upstream and,
//! after confirmation, removes them.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::core::{GITHUB_API_URL, PACKAGES_ORGANIZATION};
use crate::github::{archived_checkouts, GitHubClient};

const REMOVAL_PROMPT: &str = "Would you like to remove of all archived repos? (yes/no)";

/// Remove local checkouts of archived package repositories
#[derive(Parser, Debug, Clone)]
#[command(name = "deprecate-packages", version, about)]
pub struct DeprecatePackagesArgs {
    /// Directory holding the package checkouts
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// GitHub organization hosting the package repositories
    #[arg(long, default_value = PACKAGES_ORGANIZATION)]
    pub org: String,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = GITHUB_API_URL)]
    pub api_url: String,
}

/// Asks until the answer is exactly "yes" or "no". End of input means no.
pub fn confirm_removal<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    loop {
        writeln!(out, "{REMOVAL_PROMPT}")?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        match answer.trim_end_matches(['\n', '\r']) {
            "yes" => return Ok(true),
            "no" => return Ok(false),
            other => writeln!(out, "'{other}' is not a valid answer")?,
        }
    }
}

/// Removes each checkout, reporting per directory; returns how many failed
pub fn remove_checkouts<W: Write>(root: &Path, removals: &[String], out: &mut W) -> io::Result<usize> {
    let mut failures = 0;
    for dir in removals {
        write!(out, "Removing repository '{dir}'...")?;
        out.flush()?;
        match std::fs::remove_dir_all(root.join(dir)) {
            Ok(()) => writeln!(out, "DONE")?,
            Err(e) => {
                failures += 1;
                tracing::warn!(dir = %dir, error = %e, "removal failed");
                writeln!(out, "FAILED: {e}")?;
            }
        }
    }
    Ok(failures)
}

/// Handles the deprecate-packages command
pub async fn handle_deprecate_packages_command(args: DeprecatePackagesArgs) -> Result<()> {
    let client = GitHubClient::from_env(&args.api_url)?;
    let repos = client
        .list_org_repos(&args.org)
        .await
        .with_context(|| format!("Failed to get repos of {}", args.org))?;

    let removals = archived_checkouts(&args.root, &repos)
        .with_context(|| format!("Failed to read {}", args.root.display()))?;
    if removals.is_empty() {
        println!("No archived package checkouts found.");
        return Ok(());
    }

    println!("The following repos (directories) will be removed:\n");
    for dir in &removals {
        println!("{dir}");
    }
    println!();

    let mut stdout = io::stdout();
    if !confirm_removal(&mut io::stdin().lock(), &mut stdout)? {
        return Ok(());
    }
    remove_checkouts(&args.root, &removals, &mut stdout)?;
    Ok(())
}
