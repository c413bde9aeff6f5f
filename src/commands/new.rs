//! The `new` command: run the bootstrap pipeline with real capabilities.

use anyhow::{Context, Result};
use std::path::PathBuf;

use groundwork::cluster::KubectlSecrets;
use groundwork::containers::DockerCli;
use groundwork::forge::GitHubCli;
use groundwork::pipeline::{self, Bootstrap};
use groundwork::prompt::TerminalPrompter;
use groundwork::{BootstrapConfig, Stack};

pub fn execute(
    name: &str,
    stack: Stack,
    description: &str,
    template: Option<PathBuf>,
) -> Result<i32> {
    let template_dir = match template {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let config = BootstrapConfig::new(name, stack, description, &template_dir)?;

    let mut prompter = TerminalPrompter;
    pipeline::run(
        config,
        Bootstrap {
            prompter: &mut prompter,
            remote: &GitHubCli,
            containers: &DockerCli,
            cluster: &KubectlSecrets,
        },
    )
}
