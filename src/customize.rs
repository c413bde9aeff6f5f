//! File customization.
//!
//! Literal, case-sensitive substring substitution. No YAML/JSON/Python
//! parsing happens here; a value that merely contains the template
//! identifier as a substring gets rewritten too, which is accepted given
//! the tool's scope.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::context::BootstrapConfig;

/// The template project's machine identifier.
pub const TEMPLATE_ID: &str = "devstack-template";

/// The template project's human-facing display name.
pub const TEMPLATE_DISPLAY_NAME: &str = "DevStack Template";

/// Placeholder description sentence replaced with the user-supplied one.
pub const TEMPLATE_DESCRIPTION: &str =
    "A batteries-included development environment template with Docker, Kubernetes, and CI/CD wiring.";

/// Legacy database-name placeholders. Longest first: `template_db` is a
/// substring of `devstack_template_db` and must not clip it.
pub const LEGACY_DB_NAMES: &[&str] = &["devstack_template_db", "template_db"];

/// Files rewritten explicitly, relative to the target directory.
pub const CUSTOMIZED_FILES: &[&str] = &[
    "README.md",
    "docker-compose.yml",
    "package.json",
    "pyproject.toml",
    "Makefile",
    ".github/workflows/ci.yml",
    ".github/workflows/cd.yml",
    "k8s/deployment.yaml",
    "k8s/service.yaml",
    "k8s/ingress.yaml",
];

/// Extensions swept by the catch-all pass.
pub const CATCH_ALL_EXTENSIONS: &[&str] = &["md", "yml", "yaml", "json", "py", "ts", "tsx", "js"];

/// Apply all substitutions across the target. Returns how many files were
/// actually rewritten.
pub fn customize(target: &Path, config: &BootstrapConfig) -> Result<usize> {
    let mut rewritten = 0;

    for relative in CUSTOMIZED_FILES {
        let path = target.join(relative);
        if path.is_file() && rewrite_file(&path, config)? {
            rewritten += 1;
        }
    }

    // Safety net for files the explicit list misses; replacing the project
    // identifier twice is harmless.
    for entry in WalkDir::new(target).min_depth(1) {
        let entry = entry.context("Failed to walk target directory")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let swept = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| CATCH_ALL_EXTENSIONS.contains(&e))
            .unwrap_or(false);
        if swept && rewrite_swept_file(entry.path(), config)? {
            rewritten += 1;
        }
    }

    Ok(rewritten)
}

/// Seed `.env` from `.env.example`, substituting the project identifier.
/// Returns false when the template ships no example file.
pub fn seed_env_file(target: &Path, config: &BootstrapConfig) -> Result<bool> {
    let example = target.join(".env.example");
    if !example.is_file() {
        return Ok(false);
    }

    let content = fs::read_to_string(&example)
        .with_context(|| format!("Failed to read {}", example.display()))?;
    let env_path = target.join(".env");
    fs::write(&env_path, content.replace(TEMPLATE_ID, &config.name))
        .with_context(|| format!("Failed to write {}", env_path.display()))?;
    Ok(true)
}

fn substitute(content: &str, config: &BootstrapConfig) -> String {
    let db_name = config.database_name();
    let mut out = content.to_string();
    for legacy in LEGACY_DB_NAMES {
        out = out.replace(legacy, &db_name);
    }
    out = out.replace(TEMPLATE_ID, &config.name);
    out = out.replace(TEMPLATE_DISPLAY_NAME, &config.name);
    out.replace(TEMPLATE_DESCRIPTION, &config.description)
}

/// Fixed-list files are part of the template contract; a read failure here
/// means something is genuinely wrong with the copy.
fn rewrite_file(path: &Path, config: &BootstrapConfig) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    write_substituted(path, &content, config)
}

/// Swept files are only probably text. A non-UTF-8 file (legacy encoding,
/// minified asset with a swept extension) cannot contain the identifier
/// strings, so it is left alone instead of aborting mid-customization.
fn rewrite_swept_file(path: &Path, config: &BootstrapConfig) -> Result<bool> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(content) => write_substituted(path, &content, config),
        Err(_) => Ok(false),
    }
}

fn write_substituted(path: &Path, content: &str, config: &BootstrapConfig) -> Result<bool> {
    let replaced = substitute(content, config);
    if replaced == content {
        return Ok(false);
    }
    fs::write(path, replaced).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Stack;
    use tempfile::TempDir;

    fn config(temp: &TempDir, name: &str) -> BootstrapConfig {
        let template = temp.path().join("devstack-template");
        fs::create_dir_all(&template).unwrap();
        BootstrapConfig::new(name, Stack::Fastapi, "Demo service", &template).unwrap()
    }

    #[test]
    fn test_substitute_covers_all_placeholders() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, "my-awesome-app");
        let input = format!(
            "# {TEMPLATE_DISPLAY_NAME}\n\
             {TEMPLATE_DESCRIPTION}\n\
             image: registry/{TEMPLATE_ID}:latest\n\
             POSTGRES_DB: devstack_template_db\n\
             legacy: template_db\n"
        );
        let out = substitute(&input, &config);
        assert!(!out.contains(TEMPLATE_ID));
        assert!(!out.contains(TEMPLATE_DISPLAY_NAME));
        assert!(!out.contains("template_db"));
        assert!(out.contains("# my-awesome-app"));
        assert!(out.contains("Demo service"));
        assert!(out.contains("image: registry/my-awesome-app:latest"));
        // Both legacy placeholders map to the same derived name.
        assert_eq!(out.matches("my_awesome_app_db").count(), 2);
    }

    #[test]
    fn test_longer_db_placeholder_not_clipped_by_shorter() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, "demo-api");
        let out = substitute("db: devstack_template_db", &config);
        assert_eq!(out, "db: demo_api_db");
    }

    #[test]
    fn test_substitution_inside_unrelated_token_is_accepted() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, "demo-api");
        // Purely textual by design: the identifier is replaced even as a
        // substring of a larger token.
        let out = substitute("devstack-template-extras", &config);
        assert_eq!(out, "demo-api-extras");
    }

    #[test]
    fn test_customize_sweeps_unlisted_files() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, "demo-api");
        let target = temp.path().join("demo-api");
        fs::create_dir_all(target.join("docs")).unwrap();
        fs::write(target.join("README.md"), format!("# {TEMPLATE_DISPLAY_NAME}")).unwrap();
        fs::write(
            target.join("docs/setup.md"),
            format!("clone {TEMPLATE_ID} first"),
        )
        .unwrap();
        // Not in the fixed list and not a swept extension: left alone.
        fs::write(target.join("notes.txt"), TEMPLATE_ID).unwrap();

        customize(&target, &config).unwrap();
        assert_eq!(
            fs::read_to_string(target.join("README.md")).unwrap(),
            "# demo-api"
        );
        assert_eq!(
            fs::read_to_string(target.join("docs/setup.md")).unwrap(),
            "clone demo-api first"
        );
        assert_eq!(
            fs::read_to_string(target.join("notes.txt")).unwrap(),
            TEMPLATE_ID
        );
    }

    #[test]
    fn test_catch_all_skips_non_utf8_files() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, "demo-api");
        let target = temp.path().join("demo-api");
        fs::create_dir_all(&target).unwrap();
        // Latin-1 "café" with a swept extension.
        let latin1: &[u8] = b"caf\xe9 notes about devstack";
        fs::write(target.join("notes.md"), latin1).unwrap();
        fs::write(target.join("README.md"), format!("# {TEMPLATE_DISPLAY_NAME}")).unwrap();

        customize(&target, &config).unwrap();
        // Undecodable file left byte-identical, the rest still rewritten.
        assert_eq!(fs::read(target.join("notes.md")).unwrap(), latin1);
        assert_eq!(
            fs::read_to_string(target.join("README.md")).unwrap(),
            "# demo-api"
        );
    }

    #[test]
    fn test_env_seeding() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, "demo-api");
        let target = temp.path().join("demo-api");
        fs::create_dir_all(&target).unwrap();
        fs::write(
            target.join(".env.example"),
            format!("APP_NAME={TEMPLATE_ID}\nDEBUG=false\n"),
        )
        .unwrap();

        assert!(seed_env_file(&target, &config).unwrap());
        let env = fs::read_to_string(target.join(".env")).unwrap();
        assert!(env.contains("APP_NAME=demo-api"));

        let no_example = temp.path().join("empty");
        fs::create_dir_all(&no_example).unwrap();
        assert!(!seed_env_file(&no_example, &config).unwrap());
    }
}
