// SPDX-License-Identifier: Apache-2.0

//! Secret provisioning for pipeline credentials.
//!
//! Recreates a named Opaque secret from literal key-values: any existing
//! secret of that name is deleted first (absence is not an error), the new
//! secret is created and then read back as verification.

use clap::Parser;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{Api, DeleteParams, ObjectMeta, PostParams},
    Client,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::error::{BridgeError, Result};

#[derive(Parser, Debug)]
#[command(name = "kfbridge-secret-gen", about = "Create a Kubernetes secret from literal key-values")]
pub struct SecretGenArgs {
    /// JSON object of key-value pairs to store in the secret
    #[arg(long)]
    pub params: String,
    /// Name of the secret to create
    #[arg(long)]
    pub secret_name: String,
    /// File the created secret's name is written to
    #[arg(long, default_value = "/tmp/secret_name")]
    pub output_secret_name_file: PathBuf,
}

/// Parse the `--params` JSON object into literal string pairs.
/// Non-string values keep their JSON rendering, matching how they were
/// passed on the original command line.
pub fn parse_literals(params: &str) -> Result<BTreeMap<String, String>> {
    let value: Value = serde_json::from_str(params)?;
    let object = value
        .as_object()
        .ok_or_else(|| BridgeError::Config("--params must be a JSON object".to_string()))?;

    Ok(object
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect())
}

/// Delete-then-create the secret and verify it exists.
#[instrument(skip(client, literals))]
pub async fn provision_secret(
    client: Client,
    namespace: &str,
    name: &str,
    literals: BTreeMap<String, String>,
) -> Result<Secret> {
    let secrets: Api<Secret> = Api::namespaced(client, namespace);

    match secrets.delete(name, &DeleteParams::default()).await {
        Ok(_) => info!("Deleted previous secret '{}'", name),
        Err(kube::Error::Api(err)) if err.code == 404 => {
            info!("No previous secret '{}', deletion not performed", name)
        }
        Err(e) => return Err(e.into()),
    }

    let secret = Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        string_data: Some(literals),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    };
    secrets.create(&PostParams::default(), &secret).await?;

    // Verify the secret landed before reporting success
    let created = secrets.get(name).await?;
    info!("Created secret '{}/{}'", namespace, name);
    Ok(created)
}

/// Write the secret name to the output file, creating parent directories.
pub fn write_secret_name(path: &std::path::Path, name: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockService;

    const SECRETS_PATH: &str = "/api/v1/namespaces/default/secrets";

    fn secret_json(name: &str) -> String {
        serde_json::json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {"name": name, "namespace": "default"},
            "type": "Opaque",
        })
        .to_string()
    }

    #[test]
    fn test_parse_literals() {
        let literals = parse_literals(r#"{"user": "alice", "retries": 3}"#).unwrap();

        assert_eq!(literals.get("user").unwrap(), "alice");
        assert_eq!(literals.get("retries").unwrap(), "3");
    }

    #[test]
    fn test_parse_literals_rejects_non_object() {
        assert!(parse_literals(r#"["not", "an", "object"]"#).is_err());
        assert!(parse_literals("not json").is_err());
    }

    #[tokio::test]
    async fn test_provision_ignores_absent_previous_secret() {
        // DELETE is unregistered and falls through to the default 404
        let mock = MockService::new()
            .on_post(SECRETS_PATH, 201, &secret_json("creds"))
            .on_get(&format!("{}/creds", SECRETS_PATH), 200, &secret_json("creds"));
        let client = mock.into_client();

        let created = provision_secret(
            client,
            "default",
            "creds",
            BTreeMap::from([("user".to_string(), "alice".to_string())]),
        )
        .await
        .unwrap();

        assert_eq!(created.metadata.name.as_deref(), Some("creds"));
    }

    #[tokio::test]
    async fn test_provision_replaces_existing_secret() {
        let object_path = format!("{}/creds", SECRETS_PATH);
        let mock = MockService::new()
            .on_delete(&object_path, 200, &secret_json("creds"))
            .on_post(SECRETS_PATH, 201, &secret_json("creds"))
            .on_get(&object_path, 200, &secret_json("creds"));
        let requests = mock.requests();
        let client = mock.into_client();

        provision_secret(client, "default", "creds", BTreeMap::new())
            .await
            .unwrap();

        let methods: Vec<String> = requests
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect();
        assert_eq!(methods, vec!["DELETE", "POST", "GET"]);
    }

    #[test]
    fn test_write_secret_name_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/secret_name");

        write_secret_name(&path, "creds").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "creds");
    }
}
