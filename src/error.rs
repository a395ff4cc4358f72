// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Could not find a kfserving serving deployment with name '{0}'")]
    DeploymentNotFound(String),

    #[error("Invalid deployment spec template: {0}")]
    Template(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl BridgeError {
    /// Short classification label embedded in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::Kube(_) => "KubeError",
            BridgeError::DeploymentNotFound(_) => "DeploymentNotFound",
            BridgeError::Template(_) => "TemplateError",
            BridgeError::MissingField(_) => "MissingField",
            BridgeError::Config(_) => "ConfigError",
            BridgeError::Storage(_) => "StorageError",
            BridgeError::ModelLoad(_) => "ModelLoadError",
            BridgeError::Json(_) => "JsonError",
            BridgeError::Io(_) => "IoError",
            BridgeError::Http(_) => "HttpError",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
