//! clone-all: clone or update every Solus package repository listed in
//! common/packages, retrying failures on request.

use anyhow::Result;
use clap::Parser;

use clone_all::commands::{handle_clone_all_command, CloneAllArgs};
use clone_all::core::SyncOutcome;
use clone_all::utils::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = CloneAllArgs::parse();

    if let SyncOutcome::Interrupted { .. } = handle_clone_all_command(args).await? {
        // A pending prompt read may still hold stdin; leave without waiting on it
        std::process::exit(0);
    }

    Ok(())
}
