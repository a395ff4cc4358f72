// SPDX-License-Identifier: Apache-2.0

//! The deployment facade: upsert, status, and delete operations on the
//! KFServing InferenceService kind, plus the `run_safe` boundary that turns
//! every failure into a uniform error envelope.

use kube::{Client, ResourceExt};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::constants::{CONTAINER_POINTER, STATE_POINTER};
use crate::error::{BridgeError, Result};
use crate::names::normalize_deployment_name;
use crate::request::{DeployRequest, Mode};
use crate::store::{CustomObjectStore, ResourceCoords};
use crate::template::{env_value, SpecTemplate};

pub struct Facade {
    client: Client,
    config: Config,
}

impl Facade {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    /// Run an operation, converting any failure into the error envelope
    /// `{status: "Error", details: {error, message, trace}}`. A missing
    /// deployment on delete keeps its dedicated flat-detail shape. The HTTP
    /// layer embeds whatever this returns in a 200 response.
    pub async fn run_safe(&self, mode: Mode, request: &DeployRequest) -> Value {
        match self.dispatch(mode, request).await {
            Ok(result) => result,
            Err(BridgeError::DeploymentNotFound(name)) => {
                error!("Could not find the kfserving serving deployment '{}'", name);
                json!({
                    "status": "Error",
                    "details": format!(
                        "Could not find a kfserving serving deployment with name '{}'",
                        name
                    ),
                })
            }
            Err(e) => {
                error!("{}: {}", e.kind(), e);
                json!({
                    "status": "Error",
                    "details": {
                        "error": e.kind(),
                        "message": e.to_string(),
                        "trace": format!("{:?}", e),
                    },
                })
            }
        }
    }

    async fn dispatch(&self, mode: Mode, request: &DeployRequest) -> Result<Value> {
        match mode {
            Mode::Deploy => {
                let details = self.upsert(request).await?;
                Ok(json!({
                    "status": "Success",
                    "deployment_status": "deployed",
                    "details": details,
                }))
            }
            Mode::Status => {
                let state = self.status(request).await?;
                Ok(json!({
                    "status": "Success",
                    "deployment_status": state.unwrap_or_else(|| "UNKNOWN".to_string()),
                }))
            }
            Mode::Delete => {
                let response = self.delete(request).await?;
                let status = response
                    .get("status")
                    .cloned()
                    .unwrap_or_else(|| json!("Success"));
                let details = response.get("details").cloned().unwrap_or(response);
                Ok(json!({"status": status, "details": details}))
            }
        }
    }

    /// Create the deployment, or patch it if the name is already listed.
    ///
    /// Patches carry the observed resourceVersion so the API server rejects
    /// writes that raced another caller.
    #[instrument(skip(self, request))]
    pub async fn upsert(&self, request: &DeployRequest) -> Result<Value> {
        let (name, template) = self.prepare(request)?;
        info!("deploying '{}'", name);

        let spec = template.render(request, &name)?;
        let store = self.store(&template)?;

        match store.find(&name).await? {
            Some(existing) => {
                let mut spec = spec;
                if let Some(resource_version) = existing.resource_version() {
                    spec["metadata"]["resourceVersion"] = json!(resource_version);
                }
                store.patch(&name, &spec).await
            }
            None => store.create(&spec).await,
        }
    }

    /// Reconciliation state of the deployment, uppercased, provided the
    /// deployed TRAINING_ID matches the request's. `None` when the
    /// deployment is absent, records another training run, or carries no
    /// state yet.
    #[instrument(skip(self, request))]
    pub async fn status(&self, request: &DeployRequest) -> Result<Option<String>> {
        let (name, template) = self.prepare(request)?;
        let training_id = request
            .training_id
            .as_deref()
            .ok_or(BridgeError::MissingField("training_id"))?;
        let store = self.store(&template)?;

        if store.find(&name).await?.is_none() {
            info!(
                "Could not find a kfserving serving deployment with name '{}'",
                name
            );
            return Ok(None);
        }

        let deployed = store.get(&name).await?;
        let env = deployed
            .data
            .pointer(&format!("{}/env", CONTAINER_POINTER))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        if env_value(&env, "TRAINING_ID") != Some(training_id) {
            return Ok(None);
        }

        Ok(deployed
            .data
            .pointer(STATE_POINTER)
            .and_then(Value::as_str)
            .map(|state| state.to_uppercase()))
    }

    /// Delete the deployment by its normalized name. A name absent from the
    /// fresh list yields `DeploymentNotFound` without calling delete; no
    /// associated secrets or storage artifacts are cleaned up.
    #[instrument(skip(self, request))]
    pub async fn delete(&self, request: &DeployRequest) -> Result<Value> {
        let (name, template) = self.prepare(request)?;
        info!("deleting deployment for '{}'", name);

        let store = self.store(&template)?;
        if store.find(&name).await?.is_none() {
            return Err(BridgeError::DeploymentNotFound(name));
        }

        store.delete(&name).await
    }

    fn prepare(&self, request: &DeployRequest) -> Result<(String, SpecTemplate)> {
        let raw_name = request
            .deployment_name
            .as_deref()
            .ok_or(BridgeError::MissingField("deployment_name"))?;
        let name = normalize_deployment_name(raw_name);
        let template = SpecTemplate::load(&self.config.template_path)?;
        Ok((name, template))
    }

    fn store(&self, template: &SpecTemplate) -> Result<CustomObjectStore> {
        let coords = ResourceCoords::from_template(template)?;
        Ok(CustomObjectStore::new(
            self.client.clone(),
            &coords,
            &self.config.namespace,
        ))
    }
}
