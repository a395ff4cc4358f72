// SPDX-License-Identifier: Apache-2.0

//! The declarative deployment request and its operation-mode dispatch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters describing an intended model deployment.
///
/// Arrives either as a JSON body (`POST /`) or as query parameters
/// (`GET /`, `DELETE /`), and is assembled directly by the pipeline step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_results_bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_class_file: Option<String>,
    #[serde(default)]
    pub check_status_only: bool,
    #[serde(default)]
    pub delete_deployment: bool,
}

impl DeployRequest {
    /// Build a request from URL query parameters (`GET /` and `DELETE /`).
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let field = |key: &str| params.get(key).cloned();
        let flag = |key: &str| {
            params
                .get(key)
                .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        };

        DeployRequest {
            deployment_name: field("deployment_name"),
            container_image: field("container_image"),
            model_file_name: field("model_file_name"),
            training_id: field("training_id"),
            training_results_bucket: field("training_results_bucket"),
            endpoint_url: field("endpoint_url"),
            access_key_id: field("access_key_id"),
            secret_access_key: field("secret_access_key"),
            model_class_name: field("model_class_name"),
            model_class_file: field("model_class_file"),
            check_status_only: flag("check_status_only"),
            delete_deployment: flag("delete_deployment"),
        }
    }
}

/// The operation the facade performs for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create the deployment, or patch it if it already exists
    Deploy,
    /// Report the reconciliation state of an existing deployment
    Status,
    /// Delete the deployment
    Delete,
}

impl Mode {
    /// Derive the mode from explicit request flags, defaulting to deploy.
    pub fn from_request(request: &DeployRequest) -> Self {
        if request.check_status_only {
            Mode::Status
        } else if request.delete_deployment {
            Mode::Delete
        } else {
            Mode::Deploy
        }
    }
}
