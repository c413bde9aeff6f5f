//! Remote repository management.
//!
//! Trait-based abstraction over the forge CLI so the pipeline can run
//! against a scripted fake in tests. The only real implementation drives
//! the GitHub CLI (`gh`); authentication is whatever `gh auth login` set
//! up, never credentials of our own.

mod github;

pub use github::GitHubCli;

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::path::Path;

use crate::prompt::Prompter;
use crate::ui;
use crate::validate;

/// Write operations on the forge.
pub trait RemoteRepository {
    /// Is the forge CLI installed at all.
    fn is_available(&self) -> bool;

    /// Is the CLI authenticated.
    fn is_authenticated(&self) -> Result<bool>;

    /// Owner under which repositories are created.
    fn current_user(&self) -> Result<String>;

    fn repo_exists(&self, name: &str) -> Result<bool>;

    /// Create a public repository with the given description, using the
    /// target directory as source, and push the initial commit. Returns
    /// the repository URL.
    fn create(&self, name: &str, description: &str, repo_path: &Path) -> Result<String>;

    fn delete(&self, name: &str) -> Result<()>;

    /// Set one Actions secret on the repository.
    fn set_secret(&self, repo_path: &Path, key: &str, value: &str) -> Result<()>;
}

/// Resolution strategies for a remote repository that already exists.
#[derive(Debug, PartialEq, Eq)]
pub enum RemoteResolution {
    /// Delete the existing remote and create it fresh.
    Recreate,
    /// Create the remote under a different name.
    Rename(String),
    /// Keep the existing remote and force-push over it.
    Continue,
    /// Stop the bootstrap; not an error.
    Abort,
}

/// Present the four-way conflict menu for an existing remote. Unrecognized
/// input aborts with an error, mirroring the directory menu; only the
/// rename branch loops on validation.
pub fn prompt_remote_resolution(
    remote: &dyn RemoteRepository,
    prompter: &mut dyn Prompter,
    owner: &str,
    name: &str,
) -> Result<RemoteResolution> {
    ui::warn(&format!("Remote repository already exists: {owner}/{name}"));
    println!("  1) Delete it and recreate");
    println!("  2) Create under a different name");
    println!("  3) Continue and force-push over it");
    println!("  4) Abort");

    let choice = prompter.read_line("Select [1-4]: ")?;
    match choice.as_str() {
        "1" => Ok(RemoteResolution::Recreate),
        "2" => Ok(RemoteResolution::Rename(prompt_remote_name(
            remote, prompter,
        )?)),
        "3" => Ok(RemoteResolution::Continue),
        "4" => Ok(RemoteResolution::Abort),
        other => bail!("Invalid selection '{}'. Expected 1, 2, 3, or 4.", other),
    }
}

fn prompt_remote_name(
    remote: &dyn RemoteRepository,
    prompter: &mut dyn Prompter,
) -> Result<String> {
    loop {
        let name = prompter.read_line("New repository name: ")?;
        if !validate::is_valid_name(&name) {
            ui::warn(&format!(
                "'{}' is not kebab-case (lowercase tokens joined by single hyphens)",
                name
            ));
            continue;
        }
        if remote.repo_exists(&name)? {
            ui::warn(&format!("'{}' also exists on the forge, pick another", name));
            continue;
        }
        return Ok(name);
    }
}

/// Scripted forge for tests: fixed answers, recorded mutations.
pub struct ScriptedRemote {
    pub available: bool,
    pub authenticated: bool,
    pub user: String,
    /// Repository names that already exist on the fake forge.
    pub existing: Vec<String>,
    /// Secret keys whose `set_secret` call should fail.
    pub failing_secrets: Vec<String>,
    pub created: RefCell<Vec<String>>,
    pub deleted: RefCell<Vec<String>>,
    pub secrets: RefCell<Vec<(String, String)>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self {
            available: true,
            authenticated: true,
            user: "octocat".to_string(),
            existing: Vec::new(),
            failing_secrets: Vec::new(),
            created: RefCell::new(Vec::new()),
            deleted: RefCell::new(Vec::new()),
            secrets: RefCell::new(Vec::new()),
        }
    }

    /// A forge with no CLI installed; every optional step gets skipped.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }
}

impl Default for ScriptedRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteRepository for ScriptedRemote {
    fn is_available(&self) -> bool {
        self.available
    }

    fn is_authenticated(&self) -> Result<bool> {
        Ok(self.authenticated)
    }

    fn current_user(&self) -> Result<String> {
        Ok(self.user.clone())
    }

    fn repo_exists(&self, name: &str) -> Result<bool> {
        Ok(self.existing.iter().any(|n| n == name)
            || self.created.borrow().iter().any(|n| n == name))
    }

    fn create(&self, name: &str, _description: &str, _repo_path: &Path) -> Result<String> {
        self.created.borrow_mut().push(name.to_string());
        Ok(format!("git@github.com:{}/{}.git", self.user, name))
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.deleted.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn set_secret(&self, _repo_path: &Path, key: &str, value: &str) -> Result<()> {
        if self.failing_secrets.iter().any(|k| k == key) {
            bail!("forge rejected secret {}", key);
        }
        self.secrets
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    #[test]
    fn test_menu_maps_choices() {
        let remote = ScriptedRemote::new();
        for (answer, expected) in [
            ("1", RemoteResolution::Recreate),
            ("3", RemoteResolution::Continue),
            ("4", RemoteResolution::Abort),
        ] {
            let mut prompter = ScriptedPrompter::new([answer]);
            assert_eq!(
                prompt_remote_resolution(&remote, &mut prompter, "octocat", "demo-api").unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_rename_rechecks_the_forge() {
        let mut remote = ScriptedRemote::new();
        remote.existing.push("taken".to_string());
        let mut prompter = ScriptedPrompter::new(["2", "Bad_Name", "taken", "demo-api-2"]);
        assert_eq!(
            prompt_remote_resolution(&remote, &mut prompter, "octocat", "demo-api").unwrap(),
            RemoteResolution::Rename("demo-api-2".to_string())
        );
    }

    #[test]
    fn test_unrecognized_input_is_an_error() {
        let remote = ScriptedRemote::new();
        let mut prompter = ScriptedPrompter::new(["5"]);
        let err = prompt_remote_resolution(&remote, &mut prompter, "octocat", "demo-api")
            .unwrap_err();
        assert!(err.to_string().contains("Invalid selection"));
    }
}
