//! Container engine access.
//!
//! The bootstrapper never talks to Docker directly; everything goes through
//! `ContainerRuntime` so the pipeline can run against a fake in tests.

use anyhow::{bail, Context, Result};
use std::cell::RefCell;
use std::path::Path;
use std::process::Command;

pub trait ContainerRuntime {
    /// Is the container engine binary on PATH.
    fn engine_available(&self) -> bool;

    /// Is the compose plugin usable.
    fn compose_available(&self) -> bool;

    /// Build every image declared in the compose manifest, bypassing the
    /// layer cache.
    fn compose_build(&self, dir: &Path) -> Result<()>;

    /// Build a single image from a directory containing a Dockerfile.
    fn build_image(&self, dir: &Path, tag: &str) -> Result<()>;

    /// Run a one-shot container for the test command. `Ok(true)` means the
    /// tests passed; `Ok(false)` means they ran and failed.
    fn compose_run(&self, dir: &Path, service: &str, command: &[&str]) -> Result<bool>;
}

/// Real implementation shelling out to the `docker` CLI.
pub struct DockerCli;

impl ContainerRuntime for DockerCli {
    fn engine_available(&self) -> bool {
        which::which("docker").is_ok()
    }

    fn compose_available(&self) -> bool {
        Command::new("docker")
            .args(["compose", "version"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn compose_build(&self, dir: &Path) -> Result<()> {
        let status = Command::new("docker")
            .current_dir(dir)
            .args(["compose", "build", "--no-cache"])
            .status()
            .context("Failed to run docker compose build")?;

        if !status.success() {
            bail!("docker compose build failed in {}", dir.display());
        }
        Ok(())
    }

    fn build_image(&self, dir: &Path, tag: &str) -> Result<()> {
        let status = Command::new("docker")
            .current_dir(dir)
            .args(["build", "-t", tag, "."])
            .status()
            .with_context(|| format!("Failed to run docker build for {}", tag))?;

        if !status.success() {
            bail!("docker build failed for image {}", tag);
        }
        Ok(())
    }

    fn compose_run(&self, dir: &Path, service: &str, command: &[&str]) -> Result<bool> {
        let status = Command::new("docker")
            .current_dir(dir)
            .args(["compose", "run", "--rm", service])
            .args(command)
            .status()
            .context("Failed to run test container")?;

        Ok(status.success())
    }
}

/// Scripted runtime for tests: records every call, never touches Docker.
pub struct FakeRuntime {
    pub engine: bool,
    pub compose: bool,
    pub tests_pass: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self {
            engine: true,
            compose: true,
            tests_pass: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for FakeRuntime {
    fn engine_available(&self) -> bool {
        self.engine
    }

    fn compose_available(&self) -> bool {
        self.compose
    }

    fn compose_build(&self, _dir: &Path) -> Result<()> {
        self.record("compose build --no-cache".to_string());
        Ok(())
    }

    fn build_image(&self, _dir: &Path, tag: &str) -> Result<()> {
        self.record(format!("build {}", tag));
        Ok(())
    }

    fn compose_run(&self, _dir: &Path, service: &str, command: &[&str]) -> Result<bool> {
        self.record(format!("run {} {}", service, command.join(" ")));
        Ok(self.tests_pass)
    }
}
