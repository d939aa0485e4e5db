//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Manifest loading
//! - Batch synchronization and retry policies
//! - Pass statistics
//! - Configuration constants
//!
//! Internal implementation details are not exposed through this API.

// Core types
pub use super::progress::PassProgress;
pub use super::stats::{clean_error_message, PassStatistics};

// Manifest
pub use super::manifest::{load_packages, parse_manifest};

// Synchronization
pub use super::sync::{
    sync_package, InteractivePrompt, MaxRetries, NeverRetry, PackageAction, PackageOutcome,
    PassReport, RemoteHost, RetryPolicy, SyncOutcome, Synchronizer,
};

// Configuration
pub use super::config::{
    DEFAULT_JOBS, GITHUB_API_URL, GITHUB_TOKEN_ENV, MAX_JOBS, MIN_JOBS, PACKAGES_MANIFEST_PATH,
    PACKAGES_ORGANIZATION,
};

// User-facing messages
pub use super::config::{INTERRUPTED_MESSAGE, NO_PACKAGES_MESSAGE};

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};
