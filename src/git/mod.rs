//! Version-control setup for freshly materialized projects.

mod operations;

pub use operations::{
    add_all, add_remote, commit, default_branch_name, init, is_repo, push, set_default_branch,
};

use anyhow::Result;
use std::path::Path;

/// Initialize version control in the target and record the first commit.
///
/// Idempotent with respect to initialization: an existing `.git` directory
/// is left alone, but a commit is produced on every invocation.
pub fn init_and_commit(target: &Path, message: &str) -> Result<()> {
    if !is_repo(target)? {
        init(target)?;
        set_default_branch(target, default_branch_name())?;
    }
    add_all(target)?;
    commit(target, message)?;
    Ok(())
}
