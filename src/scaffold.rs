//! Stack-specific starter files.
//!
//! Writes a minimal entrypoint for the chosen stack into the conventional
//! subdirectory of the target. Templates ship inside the binary.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::BootstrapConfig;
use crate::stack::Stack;

const FASTAPI_MAIN: &str = include_str!("../resources/templates/fastapi/main.py.tmpl");
const NODEJS_INDEX: &str = include_str!("../resources/templates/nodejs/index.js.tmpl");
const REACT_APP: &str = include_str!("../resources/templates/react/App.tsx.tmpl");

/// Write the starter files for the configured stack. Returns the paths
/// created, relative to the target.
pub fn scaffold(target: &Path, config: &BootstrapConfig) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    match config.stack {
        Stack::Fastapi => {
            written.push(write_starter(target, "backend/app/main.py", FASTAPI_MAIN, config)?);
        }
        Stack::Nodejs => {
            written.push(write_starter(target, "backend/src/index.js", NODEJS_INDEX, config)?);
        }
        Stack::React => {
            written.push(write_starter(target, "frontend/src/App.tsx", REACT_APP, config)?);
        }
        Stack::Fullstack => {
            written.push(write_starter(target, "backend/app/main.py", FASTAPI_MAIN, config)?);
            written.push(write_starter(target, "frontend/src/App.tsx", REACT_APP, config)?);
        }
    }

    Ok(written)
}

fn write_starter(
    target: &Path,
    relative: &str,
    template: &str,
    config: &BootstrapConfig,
) -> Result<PathBuf> {
    let path = target.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = template
        .replace("{{.name}}", &config.name)
        .replace("{{.description}}", &config.description);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(PathBuf::from(relative))
}
