// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;

use crate::constants::{DEFAULT_NAMESPACE, DEFAULT_PORT, DEFAULT_TEMPLATE_PATH};

/// Facade configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace the InferenceService resources live in
    pub namespace: String,
    /// Path to the InferenceService spec template
    pub template_path: String,
    /// Port the HTTP facade listens on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let namespace =
            env::var("KFBRIDGE_NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());
        let template_path =
            env::var("KFBRIDGE_TEMPLATE").unwrap_or_else(|_| DEFAULT_TEMPLATE_PATH.to_string());
        let port = match env::var("PORT") {
            Ok(p) => p.parse().context("PORT is not a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Config {
            namespace,
            template_path,
            port,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            template_path: DEFAULT_TEMPLATE_PATH.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
