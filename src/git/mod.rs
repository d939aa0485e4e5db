pub mod client;
pub mod operations;

// Re-export commonly used items
pub use client::{GitCli, RemoteDirection, VcsClient};
pub use operations::{run_git, run_git_checked, GitError};
