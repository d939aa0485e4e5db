//! Bulk clone/update command implementation
//!
//! Reads the package manifest and brings every listed package repository
//! up to date, offering to retry failures until the operator declines.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::{
    load_packages, set_terminal_title, set_terminal_title_and_flush, InteractivePrompt,
    SyncOutcome, Synchronizer, DEFAULT_JOBS, INTERRUPTED_MESSAGE, MAX_JOBS, MIN_JOBS,
    NO_PACKAGES_MESSAGE, PACKAGES_MANIFEST_PATH,
};
use crate::git::GitCli;

/// Clone or update every package repository listed in common/packages
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "clone-all", version, about)]
pub struct CloneAllArgs {
    /// Set the number of concurrent jobs e.g -j20
    #[arg(
        short = 'j',
        value_name = "JOBS",
        default_value_t = DEFAULT_JOBS,
        value_parser = clap::value_parser!(u8).range(MIN_JOBS as i64..=MAX_JOBS as i64)
    )]
    pub jobs: u8,
}

/// Handles the clone-all command
///
/// Returns how the run ended; on [`SyncOutcome::Interrupted`] the caller is
/// expected to exit the process without further interaction.
pub async fn handle_clone_all_command(args: CloneAllArgs) -> Result<SyncOutcome> {
    set_terminal_title("🚀 clone-all");

    let packages = load_packages(Path::new(PACKAGES_MANIFEST_PATH))?;
    if packages.is_empty() {
        println!("{NO_PACKAGES_MESSAGE}");
        set_terminal_title_and_flush("✅ clone-all");
        return Ok(SyncOutcome::Completed { passes: 0 });
    }

    let synchronizer = Synchronizer::new(GitCli::new(), args.jobs as usize).with_progress(true);
    let package_word = if packages.len() == 1 {
        "package"
    } else {
        "packages"
    };
    println!(
        "🚀 Synchronizing {} {package_word} ({} concurrent)\n",
        packages.len(),
        synchronizer.jobs()
    );

    let (mut interrupt_rx, listener) = spawn_interrupt_listener();
    let outcome = synchronizer
        .run(&packages, &mut InteractivePrompt, &mut interrupt_rx)
        .await;
    listener.abort();
    set_terminal_title_and_flush("✅ clone-all");

    let outcome = outcome?;
    match &outcome {
        SyncOutcome::Completed { passes } => {
            tracing::info!(passes, "all packages synchronized");
            println!("\n✅ All packages synchronized");
        }
        SyncOutcome::Abandoned { failed, .. } => {
            println!("\n🔴 {} left unsynchronized: {}", failed.len(), failed.join(", "));
        }
        SyncOutcome::Interrupted { .. } => {
            println!("\n{INTERRUPTED_MESSAGE}");
        }
    }

    Ok(outcome)
}

/// Forwards ctrl+c into a watch channel.
///
/// The first signal asks the running pass to stop taking new packages. A
/// second one exits immediately instead of waiting for in-flight git.
fn spawn_interrupt_listener() -> (watch::Receiver<bool>, JoinHandle<()>) {
    let (interrupt_tx, interrupt_rx) = watch::channel(false);
    let handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        let _ = interrupt_tx.send(true);

        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{INTERRUPTED_MESSAGE}");
            std::process::exit(130);
        }
    });
    (interrupt_rx, handle)
}
