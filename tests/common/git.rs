//! Git testing utilities

use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Sets up a git repository with user config
/// Returns Ok(()) on success, or skips test if git is not available
pub fn setup_git_repo(path: &Path) -> Result<()> {
    let init_result = Command::new("git")
        .args(["init", "-q"])
        .current_dir(path)
        .output()?;

    if !init_result.status.success() {
        anyhow::bail!("Git not available - skipping test");
    }

    for (key, value) in [
        ("user.name", "Test User"),
        ("user.email", "test@example.com"),
        ("commit.gpgsign", "false"),
    ] {
        Command::new("git")
            .args(["config", key, value])
            .current_dir(path)
            .output()?;
    }

    Ok(())
}

/// Creates a test commit in the repository
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;

    Command::new("git")
        .args(["add", file_name])
        .current_dir(path)
        .output()?;

    let commit_result = Command::new("git")
        .args(["commit", "-q", "-m", message])
        .current_dir(path)
        .output()?;

    if !commit_result.status.success() {
        anyhow::bail!(
            "Failed to create commit: {}",
            String::from_utf8_lossy(&commit_result.stderr)
        );
    }

    Ok(())
}

/// Creates an upstream repository at `path` with one commit
pub fn create_upstream_repo(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    setup_git_repo(path)?;
    create_test_commit(path, "package.yml", "name: test\n", "Initial commit")
}

/// Reads a config value of the repository at `path`
pub fn git_config_get(path: &Path, key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .current_dir(path)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
