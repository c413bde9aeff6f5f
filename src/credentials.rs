//! Credential collection.
//!
//! Three secrets, three sources: the registry username is a fixed default,
//! the registry token comes from a masked prompt, and the deployment admin
//! password is read out of the cluster. None of them are accepted as CLI
//! flags, so they never land in shell history. The bundle lives in memory
//! only; downstream steps may push it into the remote secret store.

use anyhow::{bail, Result};

use crate::cluster::{ClusterSecrets, MANUAL_PASSWORD_COMMAND};
use crate::prompt::Prompter;

/// Default registry service account; not prompted.
pub const DEFAULT_REGISTRY_USERNAME: &str = "devstack-ci";

#[derive(Debug)]
pub struct CredentialBundle {
    pub registry_username: String,
    pub registry_token: String,
    pub deploy_password: String,
}

pub fn collect(
    prompter: &mut dyn Prompter,
    cluster: &dyn ClusterSecrets,
) -> Result<CredentialBundle> {
    let registry_token =
        prompter.read_secret("Container registry token (input hidden): ")?;
    if registry_token.is_empty() {
        bail!("Registry token must not be empty");
    }

    let deploy_password = cluster.read_admin_password()?;
    if deploy_password.is_empty() {
        bail!(
            "Deployment admin password lookup returned an empty value.\n\
             \n\
             Check the cluster secret exists and retrieve it manually with:\n  {}",
            MANUAL_PASSWORD_COMMAND
        );
    }

    Ok(CredentialBundle {
        registry_username: DEFAULT_REGISTRY_USERNAME.to_string(),
        registry_token,
        deploy_password,
    })
}
