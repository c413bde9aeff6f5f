//! Bootstrap invocation context.
//!
//! One `BootstrapConfig` replaces the pile of shell variables the workflow
//! would otherwise thread through every step. The project name can be
//! reassigned exactly once, by the directory conflict resolver's rename
//! branch; `rename` recomputes the target path so every later step sees a
//! consistent view.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::stack::Stack;

#[derive(Debug)]
pub struct BootstrapConfig {
    pub name: String,
    pub stack: Stack,
    pub description: String,
    pub template_dir: PathBuf,
    pub target_dir: PathBuf,
}

impl BootstrapConfig {
    /// The target directory is a sibling of the template directory.
    pub fn new(
        name: &str,
        stack: Stack,
        description: &str,
        template_dir: &Path,
    ) -> Result<Self> {
        let template_dir = template_dir
            .canonicalize()
            .with_context(|| format!("Template directory not found: {}", template_dir.display()))?;
        let parent = template_dir
            .parent()
            .context("Template directory has no parent; cannot place the target next to it")?
            .to_path_buf();

        Ok(Self {
            target_dir: parent.join(name),
            name: name.to_string(),
            stack,
            description: description.to_string(),
            template_dir,
        })
    }

    /// Reassign the project name and recompute the target path.
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        let parent = self
            .target_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.target_dir = parent.join(name);
    }

    /// Database identifier derived from the project name: hyphens become
    /// underscores, `_db` suffix.
    pub fn database_name(&self) -> String {
        format!("{}_db", self.name.replace('-', "_"))
    }

    /// Commit message for the initial commit.
    pub fn commit_message(&self) -> String {
        format!(
            "Bootstrap {} ({} stack): {}",
            self.name, self.stack, self.description
        )
    }
}

/// Record written to `<target>/.groundwork/project.json` after customization.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub stack: String,
    pub description: String,
    pub created: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self {
            name: config.name.clone(),
            stack: config.stack.to_string(),
            description: config.description.clone(),
            created: Utc::now(),
        }
    }
}
