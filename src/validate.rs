//! Input validation.
//!
//! All checks run before any side effect. The stack enumeration itself is
//! enforced by clap at parse time, so by the time we get here only the name
//! and description remain to be checked.

use anyhow::{bail, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Kebab-case: lowercase alphanumeric tokens joined by single hyphens.
const NAME_PATTERN: &str = "^[a-z0-9]+(-[a-z0-9]+)*$";

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NAME_PATTERN).expect("name pattern is valid"))
}

pub fn is_valid_name(name: &str) -> bool {
    name_regex().is_match(name)
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Project name must not be empty");
    }
    if !is_valid_name(name) {
        bail!(
            "Invalid project name '{}'\n\
             \n\
             Names must be kebab-case: lowercase letters, digits, and single\n\
             hyphens between tokens (pattern: {})\n\
             Examples: demo-api, my-awesome-app, svc2",
            name,
            NAME_PATTERN
        );
    }
    Ok(())
}

/// Validate every invocation parameter before the first side effect.
pub fn validate(name: &str, description: &str) -> Result<()> {
    validate_name(name)?;
    if description.trim().is_empty() {
        bail!("Project description must not be empty");
    }
    Ok(())
}
