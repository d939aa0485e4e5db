//! deprecate-packages: remove local checkouts of archived package repositories.
//!
//! USAGE: GITHUB_AUTH_TOKEN=`gh auth token` deprecate-packages --root ~/solus/packages

use clap::Parser;

use clone_all::commands::{handle_deprecate_packages_command, DeprecatePackagesArgs};
use clone_all::utils::init_logging;

#[tokio::main]
async fn main() {
    init_logging();
    let args = DeprecatePackagesArgs::parse();

    if let Err(e) = handle_deprecate_packages_command(args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
