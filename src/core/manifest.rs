//! Package manifest loading
//!
//! The manifest is a plain text file with one package name per line. It is
//! generated by `update-packages` and kept at `common/packages`.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

/// Parses manifest text into package names.
///
/// Lines are trimmed, blank lines skipped, and repeated names dropped so two
/// workers never target the same directory. Order of first appearance is kept.
pub fn parse_manifest(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

/// Loads package names from the manifest at `path`.
///
/// A missing manifest is reported on stderr and treated as an empty package
/// list. Any other read failure is returned to the caller.
pub fn load_packages(path: &Path) -> Result<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let packages = parse_manifest(&text);
            tracing::debug!(path = %path.display(), count = packages.len(), "loaded manifest");
            Ok(packages)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            eprintln!("File not found: {}", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read manifest {}", path.display())),
    }
}
