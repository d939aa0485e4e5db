//! Command handlers, one per binary.

pub mod clone_all;
pub mod deprecate_packages;
pub mod update_packages;

pub use clone_all::{handle_clone_all_command, CloneAllArgs};
pub use deprecate_packages::{handle_deprecate_packages_command, DeprecatePackagesArgs};
pub use update_packages::{handle_update_packages_command, UpdatePackagesArgs};
