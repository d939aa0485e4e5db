//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fake;
pub mod git;

pub use self::fake::{existing_checkouts, FakeCall, FakeVcs};
pub use self::git::{create_test_commit, create_upstream_repo, is_git_available, setup_git_repo};

/// Owned package names from string literals
pub fn packages(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
