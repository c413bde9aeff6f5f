//! Cluster secret store access.
//!
//! The deployment admin password lives in the cluster, not on the host.
//! `ClusterSecrets` narrows that dependency to a single read so tests can
//! swap in a static value.

use anyhow::{bail, Context, Result};
use base64::Engine;
use std::process::Command;

pub const ADMIN_SECRET_NAME: &str = "argocd-initial-admin-secret";
pub const ADMIN_SECRET_NAMESPACE: &str = "argocd";

/// The command an operator runs by hand when the automatic lookup fails.
pub const MANUAL_PASSWORD_COMMAND: &str =
    "kubectl get secret argocd-initial-admin-secret -n argocd -o jsonpath='{.data.password}' | base64 -d";

pub trait ClusterSecrets {
    /// Read and decode the deployment admin password.
    fn read_admin_password(&self) -> Result<String>;
}

/// Real implementation shelling out to `kubectl`.
pub struct KubectlSecrets;

impl ClusterSecrets for KubectlSecrets {
    fn read_admin_password(&self) -> Result<String> {
        let output = Command::new("kubectl")
            .args([
                "get",
                "secret",
                ADMIN_SECRET_NAME,
                "-n",
                ADMIN_SECRET_NAMESPACE,
                "-o",
                "jsonpath={.data.password}",
            ])
            .output()
            .context("Failed to run kubectl. Is it installed and on PATH?")?;

        if !output.status.success() {
            bail!(
                "Could not read the deployment admin secret: {}\n\
                 \n\
                 Retrieve it manually with:\n  {}",
                String::from_utf8_lossy(&output.stderr).trim(),
                MANUAL_PASSWORD_COMMAND
            );
        }

        let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
        decode_secret_payload(&raw)
    }
}

/// Decode the base64 payload kubectl returns for a secret field.
pub fn decode_secret_payload(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(raw.trim())
        .context("Deployment secret payload is not valid base64")?;
    String::from_utf8(bytes).context("Deployment secret payload is not valid UTF-8")
}

/// Fixed-value store for tests.
pub struct StaticSecrets {
    pub admin_password: String,
}

impl ClusterSecrets for StaticSecrets {
    fn read_admin_password(&self) -> Result<String> {
        Ok(self.admin_password.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret_payload() {
        // "hunter2" in base64
        assert_eq!(decode_secret_payload("aHVudGVyMg==").unwrap(), "hunter2");
    }

    #[test]
    fn test_decode_empty_payload_stays_empty() {
        assert_eq!(decode_secret_payload("").unwrap(), "");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_secret_payload("!!not-base64!!").unwrap_err();
        assert!(err.to_string().contains("base64"));
    }
}
