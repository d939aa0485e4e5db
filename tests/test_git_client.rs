//! Tests for the git-backed VCS client against local repositories
//!
//! Upstreams are plain directories, so no network is involved. Tests are
//! skipped when git is not installed.

mod common;
use common::git::git_config_get;
use common::{create_test_commit, create_upstream_repo, is_git_available};

use anyhow::Result;
use clone_all::core::{NeverRetry, PackageAction, SyncOutcome, Synchronizer};
use clone_all::git::{GitCli, GitError, RemoteDirection, VcsClient};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Accepts git:// connections and never answers them
async fn spawn_silent_server() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    Ok(format!("git://{addr}/nano.git"))
}

#[tokio::test]
async fn test_clone_then_reconfigure_remote() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }
    let temp_dir = TempDir::new()?;
    let upstream = temp_dir.path().join("upstream");
    create_upstream_repo(&upstream)?;
    let dest = temp_dir.path().join("work").join("nano");

    let client = GitCli::new();
    client
        .clone_repo(&upstream.to_string_lossy(), &dest)
        .await?;
    assert!(dest.join("package.yml").exists());

    client
        .set_remote_url(
            &dest,
            "origin",
            "https://github.com/solus-packages/nano.git",
            RemoteDirection::Fetch,
        )
        .await?;
    client
        .set_remote_url(
            &dest,
            "origin",
            "git@github.com:solus-packages/nano.git",
            RemoteDirection::Push,
        )
        .await?;

    assert_eq!(
        git_config_get(&dest, "remote.origin.url").as_deref(),
        Some("https://github.com/solus-packages/nano.git")
    );
    assert_eq!(
        git_config_get(&dest, "remote.origin.pushurl").as_deref(),
        Some("git@github.com:solus-packages/nano.git")
    );
    Ok(())
}

#[tokio::test]
async fn test_pull_fetches_new_commits() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }
    let temp_dir = TempDir::new()?;
    let upstream = temp_dir.path().join("upstream");
    create_upstream_repo(&upstream)?;
    let local = temp_dir.path().join("nano");

    let client = GitCli::new();
    client.clone_repo(&upstream.to_string_lossy(), &local).await?;
    create_test_commit(&upstream, "NEWS", "bumped\n", "Bump release")?;

    client.pull(&local).await?;
    assert!(local.join("NEWS").exists());
    Ok(())
}

#[tokio::test]
async fn test_clone_of_missing_upstream_fails() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("does-not-exist");

    let result = GitCli::new()
        .clone_repo(&missing.to_string_lossy(), &temp_dir.path().join("x"))
        .await;

    match result {
        Err(GitError::CommandFailed { args, stderr }) => {
            assert!(args.starts_with("clone"));
            assert!(!stderr.is_empty());
        }
        other => panic!("expected clone failure, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_pull_outside_repository_fails() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }
    let temp_dir = TempDir::new()?;
    let not_a_repo = temp_dir.path().join("plain");
    std::fs::create_dir(&not_a_repo)?;

    assert!(GitCli::new().pull(&not_a_repo).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_synchronizer_updates_existing_checkout_with_git() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }
    let temp_dir = TempDir::new()?;
    let upstream = temp_dir.path().join("upstream");
    create_upstream_repo(&upstream)?;
    let root = temp_dir.path().join("packages");
    std::fs::create_dir(&root)?;
    GitCli::new()
        .clone_repo(&upstream.to_string_lossy(), &root.join("nano"))
        .await?;
    create_test_commit(&upstream, "NEWS", "bumped\n", "Bump release")?;

    let synchronizer = Synchronizer::new(GitCli::new(), 2).with_root(&root);
    let (_tx, mut interrupt) = tokio::sync::watch::channel(false);
    let outcome = synchronizer
        .run(&["nano".to_string()], &mut NeverRetry, &mut interrupt)
        .await?;

    assert_eq!(outcome, SyncOutcome::Completed { passes: 1 });
    assert!(root.join("nano").join("NEWS").exists());
    Ok(())
}

#[tokio::test]
async fn test_timed_out_clone_is_cloned_again_next_time() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path().join("packages");
    std::fs::create_dir(&root)?;
    let dest = root.join("nano");
    let stalled_url = spawn_silent_server().await?;

    let result = GitCli::new()
        .with_timeout(Duration::from_millis(500))
        .clone_repo(&stalled_url, &dest)
        .await;

    assert!(matches!(result, Err(GitError::Timeout { .. })), "{result:?}");
    assert!(!dest.exists());
    assert_eq!(PackageAction::for_package(&root, "nano"), PackageAction::Clone);

    let upstream = temp_dir.path().join("upstream");
    create_upstream_repo(&upstream)?;
    GitCli::new()
        .clone_repo(&upstream.to_string_lossy(), &dest)
        .await?;
    assert!(dest.join("package.yml").exists());
    Ok(())
}

#[tokio::test]
async fn test_timed_out_clone_keeps_existing_directory() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }
    let temp_dir = TempDir::new()?;
    let dest = temp_dir.path().join("nano");
    std::fs::create_dir(&dest)?;
    let stalled_url = spawn_silent_server().await?;

    let result = GitCli::new()
        .with_timeout(Duration::from_millis(500))
        .clone_repo(&stalled_url, &dest)
        .await;

    assert!(result.is_err());
    assert!(dest.exists());
    Ok(())
}
