//! Target path resolution with interactive conflict handling.
//!
//! When the target directory already exists the operator gets exactly three
//! choices. An unrecognized menu entry aborts instead of re-prompting; only
//! the rename branch loops, and only on the name-pattern check.

use anyhow::{bail, Context, Result};
use std::fs;

use crate::context::BootstrapConfig;
use crate::prompt::Prompter;
use crate::ui;
use crate::validate;

/// Resolution strategies for an existing target directory.
#[derive(Debug, PartialEq, Eq)]
pub enum DirResolution {
    /// Remove the existing directory and continue.
    Replace,
    /// Continue under a freshly chosen name.
    Rename(String),
    /// Stop the bootstrap; not an error.
    Abort,
}

/// Outcome of resolution as seen by the pipeline driver.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    Ready,
    Aborted,
}

/// Ensure `config.target_dir` does not exist, interacting with the operator
/// if it does. On `Ready` the target path is free and consistent with
/// `config.name`.
pub fn resolve(config: &mut BootstrapConfig, prompter: &mut dyn Prompter) -> Result<Resolved> {
    if !config.target_dir.exists() {
        return Ok(Resolved::Ready);
    }

    match choose(config, prompter)? {
        DirResolution::Replace => {
            fs::remove_dir_all(&config.target_dir).with_context(|| {
                format!("Failed to remove {}", config.target_dir.display())
            })?;
            ui::info(&format!("Removed existing {}", config.target_dir.display()));
            Ok(Resolved::Ready)
        }
        DirResolution::Rename(name) => {
            config.rename(&name);
            ui::info(&format!(
                "Continuing as '{}' -> {}",
                config.name,
                config.target_dir.display()
            ));
            Ok(Resolved::Ready)
        }
        DirResolution::Abort => Ok(Resolved::Aborted),
    }
}

fn choose(config: &BootstrapConfig, prompter: &mut dyn Prompter) -> Result<DirResolution> {
    ui::warn(&format!(
        "Directory already exists: {}",
        config.target_dir.display()
    ));
    println!("  1) Remove it and continue");
    println!("  2) Choose a new project name");
    println!("  3) Exit");

    let choice = prompter.read_line("Select [1-3]: ")?;
    match choice.as_str() {
        "1" => Ok(DirResolution::Replace),
        "2" => Ok(DirResolution::Rename(prompt_new_name(config, prompter)?)),
        "3" => Ok(DirResolution::Abort),
        other => bail!("Invalid selection '{}'. Expected 1, 2, or 3.", other),
    }
}

/// Loop until a valid, non-colliding kebab-case name is entered.
fn prompt_new_name(config: &BootstrapConfig, prompter: &mut dyn Prompter) -> Result<String> {
    let parent = config
        .target_dir
        .parent()
        .context("Target directory has no parent")?;

    loop {
        let name = prompter.read_line("New project name: ")?;
        if !validate::is_valid_name(&name) {
            ui::warn(&format!(
                "'{}' is not kebab-case (lowercase tokens joined by single hyphens)",
                name
            ));
            continue;
        }
        if parent.join(&name).exists() {
            ui::warn(&format!("'{}' also exists, pick another name", name));
            continue;
        }
        return Ok(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use crate::stack::Stack;
    use tempfile::TempDir;

    fn setup(temp: &TempDir) -> BootstrapConfig {
        let template = temp.path().join("devstack-template");
        fs::create_dir(&template).unwrap();
        BootstrapConfig::new("demo-api", Stack::Fastapi, "demo", &template).unwrap()
    }

    #[test]
    fn test_no_collision_is_ready_without_prompting() {
        let temp = TempDir::new().unwrap();
        let mut config = setup(&temp);
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert_eq!(resolve(&mut config, &mut prompter).unwrap(), Resolved::Ready);
    }

    #[test]
    fn test_replace_removes_previous_contents() {
        let temp = TempDir::new().unwrap();
        let mut config = setup(&temp);
        fs::create_dir(&config.target_dir).unwrap();
        fs::write(config.target_dir.join("stale.txt"), "old").unwrap();

        let mut prompter = ScriptedPrompter::new(["1"]);
        assert_eq!(resolve(&mut config, &mut prompter).unwrap(), Resolved::Ready);
        assert!(!config.target_dir.exists());
    }

    #[test]
    fn test_rename_loops_until_valid_and_free() {
        let temp = TempDir::new().unwrap();
        let mut config = setup(&temp);
        fs::create_dir(&config.target_dir).unwrap();
        fs::create_dir(temp.path().join("taken-name")).unwrap();

        // bad pattern, then a colliding name, then a good one
        let mut prompter = ScriptedPrompter::new(["2", "Bad_Name", "taken-name", "demo-api-v2"]);
        assert_eq!(resolve(&mut config, &mut prompter).unwrap(), Resolved::Ready);
        assert_eq!(config.name, "demo-api-v2");
        assert!(config.target_dir.ends_with("demo-api-v2"));
    }

    #[test]
    fn test_abort_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let mut config = setup(&temp);
        fs::create_dir(&config.target_dir).unwrap();

        let mut prompter = ScriptedPrompter::new(["3"]);
        assert_eq!(
            resolve(&mut config, &mut prompter).unwrap(),
            Resolved::Aborted
        );
        // Existing directory is left untouched.
        assert!(config.target_dir.exists());
    }

    #[test]
    fn test_unrecognized_menu_input_aborts_with_error() {
        let temp = TempDir::new().unwrap();
        let mut config = setup(&temp);
        fs::create_dir(&config.target_dir).unwrap();

        let mut prompter = ScriptedPrompter::new(["yes please"]);
        let err = resolve(&mut config, &mut prompter).unwrap_err();
        assert!(err.to_string().contains("Invalid selection"));
    }
}
