//! update-packages: print the package list of the Solus packages organization.
//!
//! USAGE: GITHUB_AUTH_TOKEN=`gh auth token` update-packages > common/packages

use clap::Parser;

use clone_all::commands::{handle_update_packages_command, UpdatePackagesArgs};
use clone_all::utils::init_logging;

#[tokio::main]
async fn main() {
    init_logging();
    let args = UpdatePackagesArgs::parse();

    if let Err(e) = handle_update_packages_command(args).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
