//! Batch synchronization of package repositories.

pub mod coordinator;
pub mod package;
pub mod policy;
pub mod state;

pub use coordinator::Synchronizer;
pub use package::{sync_package, PackageAction, RemoteHost};
pub use policy::{InteractivePrompt, MaxRetries, NeverRetry, RetryPolicy};
pub use state::{PackageOutcome, PassReport, SyncOutcome};
