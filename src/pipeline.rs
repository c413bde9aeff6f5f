//! The bootstrap pipeline.
//!
//! One strictly linear pass: validate -> preflight -> credentials ->
//! resolve target -> copy -> customize -> record -> git -> remote ->
//! secrets -> scaffold -> build -> smoke test -> summary. Steps after the
//! initial commit are best-effort: their failures become warnings and the
//! run always reaches the summary.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cluster::ClusterSecrets;
use crate::containers::ContainerRuntime;
use crate::context::{BootstrapConfig, ProjectRecord};
use crate::credentials::{self, CredentialBundle};
use crate::customize;
use crate::forge::{self, RemoteRepository, RemoteResolution};
use crate::git;
use crate::preflight;
use crate::prompt::Prompter;
use crate::resolve::{self, Resolved};
use crate::scaffold;
use crate::template;
use crate::ui;
use crate::validate;

/// Outcome of a best-effort step.
pub enum StepOutcome {
    Success,
    Warning(String),
}

/// External capabilities the pipeline drives. Swappable for tests.
pub struct Bootstrap<'a> {
    pub prompter: &'a mut dyn Prompter,
    pub remote: &'a dyn RemoteRepository,
    pub containers: &'a dyn ContainerRuntime,
    pub cluster: &'a dyn ClusterSecrets,
}

/// Run the full bootstrap. Returns the process exit code; `Ok(0)` covers
/// both full success and a user-chosen abort from a conflict menu.
pub fn run(mut config: BootstrapConfig, mut deps: Bootstrap) -> Result<i32> {
    // Mandatory early phase: nothing below touches the filesystem until
    // all of this has passed.
    validate::validate(&config.name, &config.description)?;
    preflight::check_required(deps.containers)?;
    let bundle = credentials::collect(deps.prompter, deps.cluster)?;

    if resolve::resolve(&mut config, deps.prompter)? == Resolved::Aborted {
        ui::info("Bootstrap aborted; nothing was changed.");
        return Ok(0);
    }

    ui::heading(&format!("Bootstrapping '{}'", config.name));

    let copied = template::materialize(&config.template_dir, &config.target_dir)?;
    ui::success(&format!("Copied {} files from the template", copied));

    let rewritten = customize::customize(&config.target_dir, &config)?;
    ui::success(&format!("Customized {} files", rewritten));
    if customize::seed_env_file(&config.target_dir, &config)? {
        ui::success("Seeded .env from .env.example");
    }

    write_project_record(&config.target_dir, &config)?;

    git::init_and_commit(&config.target_dir, &config.commit_message())?;
    ui::success("Initialized repository and recorded the initial commit");

    let mut warnings: Vec<String> = Vec::new();

    match remote_phase(&config, &bundle, &mut deps, &mut warnings)? {
        Resolved::Ready => {}
        Resolved::Aborted => {
            ui::info("Bootstrap aborted at remote setup; local project kept.");
            return Ok(0);
        }
    }

    let starters = scaffold::scaffold(&config.target_dir, &config)?;
    for path in &starters {
        ui::success(&format!("Scaffolded {}", path.display()));
    }

    build_phase(&config, deps.containers, &mut warnings);
    note(smoke_test_phase(&config, deps.containers), &mut warnings);

    summary(&config, &warnings);
    Ok(0)
}

fn note(outcome: StepOutcome, warnings: &mut Vec<String>) {
    if let StepOutcome::Warning(reason) = outcome {
        ui::warn(&reason);
        warnings.push(reason);
    }
}

fn write_project_record(target: &Path, config: &BootstrapConfig) -> Result<()> {
    let dir = target.join(".groundwork");
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let record = ProjectRecord::from_config(config);
    let path = dir.join("project.json");
    fs::write(&path, serde_json::to_string_pretty(&record)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Remote creation plus secret seeding. Both are optional: a missing or
/// unauthenticated forge CLI downgrades the whole phase to a warning.
fn remote_phase(
    config: &BootstrapConfig,
    bundle: &CredentialBundle,
    deps: &mut Bootstrap,
    warnings: &mut Vec<String>,
) -> Result<Resolved> {
    let remote = deps.remote;

    if !remote.is_available() {
        note(
            StepOutcome::Warning(
                "gh CLI not found; skipping remote repository and secrets".to_string(),
            ),
            warnings,
        );
        return Ok(Resolved::Ready);
    }
    match remote.is_authenticated() {
        Ok(true) => {}
        Ok(false) => {
            note(
                StepOutcome::Warning(
                    "gh CLI is not authenticated (run `gh auth login`); skipping remote repository and secrets"
                        .to_string(),
                ),
                warnings,
            );
            return Ok(Resolved::Ready);
        }
        Err(e) => {
            note(
                StepOutcome::Warning(format!("Could not probe gh authentication: {e:#}")),
                warnings,
            );
            return Ok(Resolved::Ready);
        }
    }

    let owner = match remote.current_user() {
        Ok(owner) => owner,
        Err(e) => {
            note(
                StepOutcome::Warning(format!("Could not resolve forge user: {e:#}")),
                warnings,
            );
            return Ok(Resolved::Ready);
        }
    };

    let exists = match remote.repo_exists(&config.name) {
        Ok(exists) => exists,
        Err(e) => {
            note(
                StepOutcome::Warning(format!("Could not check remote repository: {e:#}")),
                warnings,
            );
            return Ok(Resolved::Ready);
        }
    };

    if !exists {
        match remote.create(&config.name, &config.description, &config.target_dir) {
            Ok(url) => ui::success(&format!("Created remote repository {}", url)),
            Err(e) => note(
                StepOutcome::Warning(format!("Failed to create remote repository: {e:#}")),
                warnings,
            ),
        }
    } else {
        // Conflict menu is NOT best-effort: an invalid selection is a hard
        // error and abort ends the run with exit 0.
        match forge::prompt_remote_resolution(remote, deps.prompter, &owner, &config.name)? {
            RemoteResolution::Recreate => {
                if let Err(e) = remote.delete(&config.name) {
                    note(
                        StepOutcome::Warning(format!("Failed to delete remote: {e:#}")),
                        warnings,
                    );
                } else {
                    match remote.create(&config.name, &config.description, &config.target_dir) {
                        Ok(url) => ui::success(&format!("Recreated remote repository {}", url)),
                        Err(e) => note(
                            StepOutcome::Warning(format!("Failed to recreate remote: {e:#}")),
                            warnings,
                        ),
                    }
                }
            }
            RemoteResolution::Rename(remote_name) => {
                match remote.create(&remote_name, &config.description, &config.target_dir) {
                    Ok(url) => ui::success(&format!("Created remote repository {}", url)),
                    Err(e) => note(
                        StepOutcome::Warning(format!("Failed to create remote: {e:#}")),
                        warnings,
                    ),
                }
            }
            RemoteResolution::Continue => {
                let url = format!("git@github.com:{}/{}.git", owner, config.name);
                let pushed = git::add_remote(&config.target_dir, "origin", &url)
                    .and_then(|_| git::push(&config.target_dir, "origin", true));
                match pushed {
                    Ok(()) => ui::success(&format!("Force-pushed to {}", url)),
                    Err(e) => note(
                        StepOutcome::Warning(format!("Force push failed: {e:#}")),
                        warnings,
                    ),
                }
            }
            RemoteResolution::Abort => return Ok(Resolved::Aborted),
        }
    }

    seed_secrets(config, bundle, remote, warnings);
    Ok(Resolved::Ready)
}

/// Seed the three Actions secrets; each call is reported independently and
/// one failure never stops the others.
fn seed_secrets(
    config: &BootstrapConfig,
    bundle: &CredentialBundle,
    remote: &dyn RemoteRepository,
    warnings: &mut Vec<String>,
) {
    let secrets = [
        ("REGISTRY_USERNAME", bundle.registry_username.as_str()),
        ("REGISTRY_TOKEN", bundle.registry_token.as_str()),
        ("ARGOCD_PASSWORD", bundle.deploy_password.as_str()),
    ];

    for (key, value) in secrets {
        match remote.set_secret(&config.target_dir, key, value) {
            Ok(()) => ui::success(&format!("Set secret {}", key)),
            Err(e) => note(
                StepOutcome::Warning(format!("Failed to set secret {}: {e:#}", key)),
                warnings,
            ),
        }
    }
}

/// Build compose images and any per-side images. Each build is independent;
/// one failure does not stop the next.
fn build_phase(
    config: &BootstrapConfig,
    containers: &dyn ContainerRuntime,
    warnings: &mut Vec<String>,
) {
    let target = &config.target_dir;

    if target.join("docker-compose.yml").is_file() {
        ui::info("Building compose images (no cache)...");
        if let Err(e) = containers.compose_build(target) {
            note(
                StepOutcome::Warning(format!("Compose build failed: {e:#}")),
                warnings,
            );
        }
    }

    for side in ["backend", "frontend"] {
        let dir = target.join(side);
        if dir.join("Dockerfile").is_file() {
            let tag = format!("{}-{}:latest", config.name, side);
            ui::info(&format!("Building image {}...", tag));
            if let Err(e) = containers.build_image(&dir, &tag) {
                note(
                    StepOutcome::Warning(format!("Image build failed for {}: {e:#}", tag)),
                    warnings,
                );
            }
        }
    }
}

fn smoke_test_phase(config: &BootstrapConfig, containers: &dyn ContainerRuntime) -> StepOutcome {
    if !config.target_dir.join("docker-compose.yml").is_file() {
        return StepOutcome::Success;
    }

    let service = config.stack.test_service();
    let command = config.stack.test_command();
    ui::info(&format!(
        "Running smoke tests ({} {})...",
        service,
        command.join(" ")
    ));

    match containers.compose_run(&config.target_dir, service, command) {
        Ok(true) => {
            ui::success("Smoke tests passed");
            StepOutcome::Success
        }
        Ok(false) => StepOutcome::Warning(
            "Smoke tests failed; fix them before the first deploy".to_string(),
        ),
        Err(e) => StepOutcome::Warning(format!("Could not run smoke tests: {e:#}")),
    }
}

/// Always reached once past the mandatory early phase.
fn summary(config: &BootstrapConfig, warnings: &[String]) {
    ui::heading(&format!("Project '{}' is ready", config.name));
    println!("  Location: {}", config.target_dir.display());

    if !warnings.is_empty() {
        println!("\n  Completed with {} warning(s):", warnings.len());
        for warning in warnings {
            println!("    - {}", warning);
        }
    }

    println!("\nNext steps:");
    println!("  1. cd {}", config.name);
    println!("  2. Review .env and adjust local overrides");
    println!("  3. docker compose up");
    println!("  4. Push your first feature branch");
}
