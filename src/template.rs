//! Template materialization.
//!
//! Recursive copy of the template tree into the target directory. The
//! exclusion set covers version-control metadata, dependency caches,
//! bytecode caches, and the local environment override. Any copy failure is
//! fatal; there is no partial-copy recovery.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Directories never copied into a new project.
pub const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", "__pycache__", ".venv", "target"];

/// Files never copied into a new project.
pub const EXCLUDED_FILES: &[&str] = &[".env"];

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn is_excluded_file(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    EXCLUDED_FILES.contains(&name.as_ref()) || name.ends_with(".pyc")
}

/// Copy every non-excluded file from `template` into `target`. Returns the
/// number of files copied.
pub fn materialize(template: &Path, target: &Path) -> Result<usize> {
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create {}", target.display()))?;

    let mut copied = 0;
    for entry in WalkDir::new(template)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e))
    {
        let entry = entry.context("Failed to walk template directory")?;
        let relative = entry
            .path()
            .strip_prefix(template)
            .expect("walkdir yields paths under its root");
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)
                .with_context(|| format!("Failed to create {}", destination.display()))?;
        } else if !is_excluded_file(&entry) {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::copy(entry.path(), &destination).with_context(|| {
                format!(
                    "Failed to copy {} -> {}",
                    entry.path().display(),
                    destination.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}
