//! GitHub organization listing used to maintain the package manifest.

pub mod client;
pub mod repos;

pub use client::{next_page, GitHubClient, GitHubError, OrgRepository};
pub use repos::{active_package_names, archived_checkouts};
