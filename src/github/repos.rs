//! Selection of organization repositories for the package tooling

use std::io;
use std::path::Path;

use super::client::OrgRepository;
use crate::core::config::GITHUB_META_REPO;

/// Names of the live package repositories: not archived, not the
/// organization's `.github` repository, sorted.
pub fn active_package_names(repos: &[OrgRepository]) -> Vec<String> {
    let mut names: Vec<String> = repos
        .iter()
        .filter(|repo| !repo.archived && repo.name != GITHUB_META_REPO)
        .map(|repo| repo.name.clone())
        .collect();
    names.sort();
    names
}

/// Directories directly under `root` that are checkouts of archived repositories
pub fn archived_checkouts(root: &Path, repos: &[OrgRepository]) -> io::Result<Vec<String>> {
    let mut removals = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if repos.iter().any(|repo| repo.archived && repo.name == name) {
            removals.push(name);
        }
    }
    removals.sort();
    Ok(removals)
}
