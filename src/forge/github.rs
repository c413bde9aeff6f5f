//! GitHub implementation of `RemoteRepository`, driven by the `gh` CLI.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

use super::RemoteRepository;

pub struct GitHubCli;

impl RemoteRepository for GitHubCli {
    fn is_available(&self) -> bool {
        which::which("gh").is_ok()
    }

    fn is_authenticated(&self) -> Result<bool> {
        let output = Command::new("gh")
            .args(["auth", "status"])
            .output()
            .context("Failed to run `gh auth status`. Is `gh` CLI installed?")?;

        Ok(output.status.success())
    }

    fn current_user(&self) -> Result<String> {
        let output = Command::new("gh")
            .args(["api", "user", "--jq", ".login"])
            .output()
            .context("Failed to get current GitHub user. Is 'gh' installed and authenticated?")?;

        if !output.status.success() {
            bail!(
                "Failed to get GitHub user: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn repo_exists(&self, name: &str) -> Result<bool> {
        let user = self.current_user()?;
        let full_name = format!("{}/{}", user, name);
        let output = Command::new("gh")
            .args(["repo", "view", &full_name])
            .output()
            .context("Failed to check if repository exists")?;

        Ok(output.status.success())
    }

    fn create(&self, name: &str, description: &str, repo_path: &Path) -> Result<String> {
        let output = Command::new("gh")
            .current_dir(repo_path)
            .args([
                "repo",
                "create",
                name,
                "--public",
                "--description",
                description,
                "--source=.",
                "--push",
            ])
            .output()
            .context("Failed to create GitHub repository")?;

        if !output.status.success() {
            bail!(
                "Failed to create repository: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        let user = self.current_user()?;
        Ok(format!("git@github.com:{}/{}.git", user, name))
    }

    fn delete(&self, name: &str) -> Result<()> {
        let user = self.current_user()?;
        let full_name = format!("{}/{}", user, name);
        let output = Command::new("gh")
            .args(["repo", "delete", &full_name, "--yes"])
            .output()
            .context("Failed to delete repository")?;

        if !output.status.success() {
            bail!(
                "Failed to delete {}: {}",
                full_name,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }

    fn set_secret(&self, repo_path: &Path, key: &str, value: &str) -> Result<()> {
        let output = Command::new("gh")
            .current_dir(repo_path)
            .args(["secret", "set", key, "--body", value])
            .output()
            .with_context(|| format!("Failed to set secret {}", key))?;

        if !output.status.success() {
            bail!(
                "Failed to set secret {}: {}",
                key,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }
}
