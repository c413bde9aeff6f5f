//! The `doctor` command: report host tooling status.

use anyhow::Result;
use colored::Colorize;

use groundwork::containers::{ContainerRuntime, DockerCli};
use groundwork::preflight::{self, OPTIONAL_TOOLS};
use groundwork::ui;

pub fn execute() -> Result<i32> {
    ui::heading("Host tooling");

    let docker = DockerCli;
    let mut missing_required = false;

    for status in [preflight::probe("docker"), preflight::probe("git")] {
        print_status(&status.name, status.available, status.version.as_deref(), true);
        missing_required |= !status.available;
    }

    let compose = docker.compose_available();
    print_status("docker compose", compose, None, true);
    missing_required |= !compose;

    ui::heading("Optional tooling");
    for tool in OPTIONAL_TOOLS {
        let status = preflight::probe(tool);
        print_status(&status.name, status.available, status.version.as_deref(), false);
    }

    if missing_required {
        ui::error("Some required tools are missing; `groundwork new` will refuse to run.");
        Ok(1)
    } else {
        ui::success("All required tools present.");
        Ok(0)
    }
}

fn print_status(name: &str, available: bool, version: Option<&str>, required: bool) {
    let mark = if available {
        "✓".green().bold().to_string()
    } else {
        "✗".red().bold().to_string()
    };
    let detail = match (available, version) {
        (true, Some(version)) => version.to_string(),
        (true, None) => "available".to_string(),
        (false, _) if required => "not installed (required)".to_string(),
        (false, _) => "not installed (optional steps will be skipped)".to_string(),
    };
    println!("   {:<16} {} {}", name, mark, detail.dimmed());
}
