//! Manifest generation command implementation
//!
//! Prints the sorted names of the organization's live package repositories in
//! manifest format, e.g. `update-packages > common/packages`.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use crate::core::{GITHUB_API_URL, PACKAGES_ORGANIZATION};
use crate::github::{active_package_names, GitHubClient};

/// Print the package list of the organization, one name per line
#[derive(Parser, Debug, Clone)]
#[command(name = "update-packages", version, about)]
pub struct UpdatePackagesArgs {
    /// GitHub organization hosting the package repositories
    #[arg(long, default_value = PACKAGES_ORGANIZATION)]
    pub org: String,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = GITHUB_API_URL)]
    pub api_url: String,
}

/// Fetches the names that belong in the manifest
pub async fn fetch_package_names(client: &GitHubClient, org: &str) -> Result<Vec<String>> {
    let repos = client
        .list_org_repos(org)
        .await
        .with_context(|| format!("Failed to get repos of {org}"))?;
    Ok(active_package_names(&repos))
}

/// Writes names in manifest format
pub fn write_manifest<W: Write>(out: &mut W, names: &[String]) -> io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    out.flush()
}

/// Handles the update-packages command
pub async fn handle_update_packages_command(args: UpdatePackagesArgs) -> Result<()> {
    let client = GitHubClient::from_env(&args.api_url)?;
    let names = fetch_package_names(&client, &args.org).await?;
    tracing::info!(count = names.len(), "writing package list");
    write_manifest(&mut io::stdout().lock(), &names)?;
    Ok(())
}
