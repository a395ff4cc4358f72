// SPDX-License-Identifier: Apache-2.0

//! Dynamic custom-object access for the InferenceService kind.
//!
//! The kind's coordinates come from the spec template at request time, so the
//! resources are handled through `Api<DynamicObject>` rather than a derived
//! CRD type. Nothing is cached; every operation hits the API server.

use kube::api::{Api, DeleteParams, DynamicObject, ListParams, Patch, PatchParams, PostParams};
use kube::discovery::ApiResource;
use kube::{Client, ResourceExt};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::template::SpecTemplate;

/// API coordinates of the custom-resource kind the facade manages.
#[derive(Debug, Clone)]
pub struct ResourceCoords {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
}

impl ResourceCoords {
    /// Read coordinates from the template's `apiVersion` and `kind` fields.
    pub fn from_template(template: &SpecTemplate) -> Result<Self> {
        let (group, version) = template.group_version()?;
        Ok(Self {
            kind: template.kind()?.to_string(),
            plural: template.plural()?,
            group,
            version,
        })
    }

    fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: format!("{}/{}", self.group, self.version),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        }
    }
}

/// Namespaced CRUD handle for the managed custom-resource kind.
pub struct CustomObjectStore {
    api: Api<DynamicObject>,
}

impl CustomObjectStore {
    pub fn new(client: Client, coords: &ResourceCoords, namespace: &str) -> Self {
        let api = Api::namespaced_with(client, namespace, &coords.api_resource());
        Self { api }
    }

    /// List the deployments currently present in the namespace.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<DynamicObject>> {
        let objects = self.api.list(&ListParams::default()).await?;
        debug!("listed {} custom objects", objects.items.len());
        Ok(objects.items)
    }

    /// Find a deployment by name, fetching the current list fresh.
    pub async fn find(&self, name: &str) -> Result<Option<DynamicObject>> {
        Ok(self.list().await?.into_iter().find(|o| o.name_any() == name))
    }

    pub async fn get(&self, name: &str) -> Result<DynamicObject> {
        Ok(self.api.get(name).await?)
    }

    #[instrument(skip(self, spec))]
    pub async fn create(&self, spec: &Value) -> Result<Value> {
        let object: DynamicObject = serde_json::from_value(spec.clone())?;
        let created = self.api.create(&PostParams::default(), &object).await?;
        Ok(serde_json::to_value(&created)?)
    }

    #[instrument(skip(self, spec))]
    pub async fn patch(&self, name: &str, spec: &Value) -> Result<Value> {
        let patched = self
            .api
            .patch(name, &PatchParams::default(), &Patch::Merge(spec))
            .await?;
        Ok(serde_json::to_value(&patched)?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<Value> {
        let response = self.api.delete(name, &DeleteParams::default()).await?;
        let value = response
            .map_left(|object| serde_json::to_value(&object))
            .map_right(|status| serde_json::to_value(&status))
            .into_inner()?;
        Ok(value)
    }
}
