//! Low-level git operations.
//!
//! Every function takes the repository path explicitly; the bootstrapper
//! never assumes the current working directory is the target project.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

const DEFAULT_BRANCH: &str = "main";

pub fn default_branch_name() -> &'static str {
    DEFAULT_BRANCH
}

/// Check whether the directory already has version-control metadata.
pub fn is_repo(path: &Path) -> Result<bool> {
    Ok(path.join(".git").exists())
}

/// Initialize a new repository.
pub fn init(path: &Path) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .arg("init")
        .output()
        .context("Failed to run git init")?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to initialize repository: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

/// Rename the current branch to the given name.
pub fn set_default_branch(path: &Path, name: &str) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["branch", "-M", name])
        .output()
        .context("Failed to set default branch")?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to set default branch to {}: {}",
            name,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

/// Stage all changes.
pub fn add_all(path: &Path) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["add", "."])
        .output()
        .context("Failed to stage changes")?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to stage changes: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

/// Create a commit.
pub fn commit(path: &Path, message: &str) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["commit", "-m", message])
        .output()
        .context("Failed to create commit")?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to create commit: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

/// Add a remote. Adding an already-configured remote is not an error; the
/// continue-with-existing-remote branch may run twice against one target.
pub fn add_remote(path: &Path, name: &str, url: &str) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["remote", "add", name, url])
        .output()
        .context("Failed to add remote")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("already exists") {
            return Ok(());
        }
        anyhow::bail!("Failed to add remote: {}", stderr);
    }
    Ok(())
}

/// Push the default branch to a remote, setting upstream.
pub fn push(path: &Path, remote: &str, force: bool) -> Result<()> {
    let mut args = vec!["push", "-u", remote, DEFAULT_BRANCH];
    if force {
        args.insert(1, "--force");
    }

    let output = Command::new("git")
        .current_dir(path)
        .args(&args)
        .output()
        .context("Failed to push")?;

    if !output.status.success() {
        anyhow::bail!(
            "Failed to push to {}: {}",
            remote,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}
