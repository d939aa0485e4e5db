//! # solus-clone-all
//!
//! `solus-clone-all` keeps a local checkout of every Solus package repository
//! up to date. It powers the `clone-all`, `update-packages` and
//! `deprecate-packages` tools.
//!
//! ## Core Features
//!
//! - **Bounded Concurrency**: Clones and pulls run on a worker pool of 1 to 30 slots.
//! - **Retry Loop**: Failed packages are retried in further passes for as long as the
//!   retry policy agrees.
//! - **Pluggable VCS**: The synchronizer talks to git through the `VcsClient` trait.
//! - **Manifest Upkeep**: The package list is generated from the GitHub organization,
//!   and checkouts of archived repositories can be pruned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use clone_all::core::{load_packages, MaxRetries, Synchronizer};
//! use clone_all::git::GitCli;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let packages = load_packages(Path::new("common/packages"))?;
//!     let (_tx, mut interrupt) = tokio::sync::watch::channel(false);
//!     let outcome = Synchronizer::new(GitCli::new(), 8)
//!         .run(&packages, &mut MaxRetries::new(2), &mut interrupt)
//!         .await?;
//!     println!("finished after {} passes", outcome.passes());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod github;
pub mod utils;
