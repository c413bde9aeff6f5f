//! Preflight checks - ensure the host can run a bootstrap.
//!
//! Required tooling is reported as one aggregated list so the operator
//! fixes everything in a single pass. Nothing is ever installed here.

use anyhow::{bail, Result};
use std::process::Command;

use crate::containers::ContainerRuntime;

/// Tools that unlock optional steps (remote creation, secret seeding).
pub const OPTIONAL_TOOLS: &[&str] = &["gh", "kubectl"];

pub struct ToolStatus {
    pub name: String,
    pub available: bool,
    pub version: Option<String>,
}

/// Probe a single executable and its `--version` output.
pub fn probe(name: &str) -> ToolStatus {
    let available = which::which(name).is_ok();
    let version = available
        .then(|| {
            Command::new(name)
                .arg("--version")
                .output()
                .ok()
                .filter(|o| o.status.success())
                .map(|o| {
                    String::from_utf8_lossy(&o.stdout)
                        .lines()
                        .next()
                        .unwrap_or("")
                        .to_string()
                })
        })
        .flatten();

    ToolStatus {
        name: name.to_string(),
        available,
        version,
    }
}

/// Verify every required tool is present; aggregate all misses into one
/// error instead of failing on the first.
pub fn check_required(containers: &dyn ContainerRuntime) -> Result<()> {
    let mut missing = Vec::new();

    if !containers.engine_available() {
        missing.push("docker");
    }
    if !containers.compose_available() {
        missing.push("docker compose (plugin)");
    }
    if which::which("git").is_err() {
        missing.push("git");
    }

    if !missing.is_empty() {
        bail!(
            "Missing required tools: {}\n\
             \n\
             Install them and re-run. The bootstrapper never installs\n\
             tooling on your behalf.",
            missing.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::FakeRuntime;

    #[test]
    fn test_probe_reports_missing_binary() {
        let status = probe("definitely-not-a-real-tool-zz");
        assert!(!status.available);
        assert!(status.version.is_none());
    }

    #[test]
    fn test_all_missing_tools_reported_together() {
        let runtime = FakeRuntime {
            engine: false,
            compose: false,
            ..FakeRuntime::new()
        };
        let err = check_required(&runtime).unwrap_err().to_string();
        assert!(err.contains("docker"));
        assert!(err.contains("compose"));
    }

    #[test]
    fn test_passes_when_everything_present() {
        // git is assumed present on development hosts running this suite.
        let runtime = FakeRuntime::new();
        assert!(check_required(&runtime).is_ok());
    }
}
