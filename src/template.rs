// SPDX-License-Identifier: Apache-2.0

//! InferenceService spec template loading and per-request mutation.
//!
//! The template is read fresh from disk on every request and never persisted
//! after submission; the API server remains the sole source of truth.

use serde_json::{json, Value};
use std::path::Path;

use crate::constants::{env_keys, CONTAINER_POINTER};
use crate::error::{BridgeError, Result};
use crate::request::DeployRequest;

/// A declarative InferenceService document loaded from static storage.
#[derive(Debug, Clone)]
pub struct SpecTemplate {
    value: Value,
}

impl SpecTemplate {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            BridgeError::Template(format!(
                "cannot read template '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| BridgeError::Template(format!("template is not valid JSON: {}", e)))?;
        Ok(Self { value })
    }

    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// `group` and `version` parsed from the template's `apiVersion` field.
    pub fn group_version(&self) -> Result<(String, String)> {
        let api_version = self
            .value
            .get("apiVersion")
            .and_then(Value::as_str)
            .ok_or_else(|| BridgeError::Template("missing 'apiVersion'".to_string()))?;
        let (group, version) = api_version.split_once('/').ok_or_else(|| {
            BridgeError::Template(format!("'apiVersion' is not group/version: {}", api_version))
        })?;
        Ok((group.to_string(), version.to_string()))
    }

    pub fn kind(&self) -> Result<&str> {
        self.value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| BridgeError::Template("missing 'kind'".to_string()))
    }

    /// Resource plural, formed by lower-casing the kind and appending "s".
    pub fn plural(&self) -> Result<String> {
        Ok(format!("{}s", self.kind()?.to_lowercase()))
    }

    /// Produce the spec to submit: metadata name set, container image
    /// overridden when supplied, env vars merged from the request.
    pub fn render(&self, request: &DeployRequest, deployment_name: &str) -> Result<Value> {
        let mut spec = self.value.clone();

        spec.as_object_mut()
            .ok_or_else(|| BridgeError::Template("template root is not an object".to_string()))?;
        spec["metadata"]["name"] = json!(deployment_name);

        let container = spec.pointer_mut(CONTAINER_POINTER).ok_or_else(|| {
            BridgeError::Template(format!("template has no container at {}", CONTAINER_POINTER))
        })?;

        if let Some(image) = &request.container_image {
            container["image"] = json!(image);
        }

        let existing = container
            .get("env")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        container["env"] = Value::Array(merge_env(&existing, &request_env_overrides(request)));

        Ok(spec)
    }
}

/// Env-var keys supplied by the request, in the order they are applied.
fn request_env_overrides(request: &DeployRequest) -> Vec<(&'static str, String)> {
    let mut overrides = Vec::new();
    let mut push = |key: &'static str, value: &Option<String>| {
        if let Some(v) = value {
            overrides.push((key, v.clone()));
        }
    };

    push(env_keys::MODEL_FILE_NAME, &request.model_file_name);
    push(env_keys::TRAINING_ID, &request.training_id);
    push(env_keys::BUCKET_NAME, &request.training_results_bucket);
    push(env_keys::BUCKET_ENDPOINT_URL, &request.endpoint_url);
    push(env_keys::BUCKET_KEY, &request.access_key_id);
    push(env_keys::BUCKET_SECRET, &request.secret_access_key);
    push(env_keys::MODEL_CLASS_NAME, &request.model_class_name);
    push(env_keys::MODEL_CLASS_FILE, &request.model_class_file);
    overrides
}

/// Merge env-var overrides into a `[{name, value}]` list.
///
/// Overrides win per key; template insertion order is preserved for untouched
/// keys and new keys are appended in override order.
fn merge_env(existing: &[Value], overrides: &[(&'static str, String)]) -> Vec<Value> {
    let mut merged: Vec<(String, String)> = existing
        .iter()
        .filter_map(|var| {
            let name = var.get("name")?.as_str()?;
            let value = var.get("value")?.as_str()?;
            Some((name.to_string(), value.to_string()))
        })
        .collect();

    for (key, value) in overrides {
        match merged.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing_value)) => *existing_value = value.clone(),
            None => merged.push((key.to_string(), value.clone())),
        }
    }

    merged
        .into_iter()
        .map(|(name, value)| json!({"name": name, "value": value}))
        .collect()
}

/// Look up a value in a `[{name, value}]` env list.
pub fn env_value<'a>(env: &'a [Value], key: &str) -> Option<&'a str> {
    env.iter()
        .find(|var| var.get("name").and_then(Value::as_str) == Some(key))
        .and_then(|var| var.get("value"))
        .and_then(Value::as_str)
}
