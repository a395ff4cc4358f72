// SPDX-License-Identifier: Apache-2.0

//! Pipeline step that drives the deployment facade.
//!
//! Gathers credentials from mounted secret files and CLI flags, issues the
//! deploy or cleanup call (in-process against the cluster, or over HTTP when
//! a facade URL is configured), and writes the result JSON to the metric
//! path for the orchestrating pipeline to read. No retries: a failed call
//! lands in the output file as-is.

use clap::Parser;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::{secret_files, DEFAULT_CUSTOM_DOMAIN};
use crate::error::{BridgeError, Result};
use crate::facade::Facade;
use crate::request::{DeployRequest, Mode};

#[derive(Parser, Debug)]
#[command(name = "kfbridge-step", about = "Deploy a trained model through the kfbridge facade")]
pub struct StepArgs {
    /// Training model id
    #[arg(long, default_value = "training-dummy")]
    pub model_id: String,
    /// Path for deployment output
    #[arg(long, default_value = "/tmp/log.txt")]
    pub metric_path: PathBuf,
    /// Clean up previous model deployments instead of deploying
    #[arg(long, default_value_t = false)]
    pub cleanup: bool,
    /// Model serving container image
    #[arg(long, default_value = "kfbridge/model-server:latest")]
    pub model_serving_image: String,
    /// Model deployment name
    #[arg(long, default_value = "model-serving")]
    pub deployment_name: String,
    /// Model class name
    #[arg(long, default_value = "ModelClass")]
    pub model_class_name: String,
    /// Model binary filename
    #[arg(long, default_value = "model.pt")]
    pub model_file_name: String,
    /// File that contains the model class
    #[arg(long, default_value = "model_class.py")]
    pub model_class_file: String,
    /// Directory holding the mounted credential files
    #[arg(long, default_value = secret_files::BASE_DIR)]
    pub secrets_dir: PathBuf,
}

/// Credentials and endpoints read from the mounted secret files.
#[derive(Debug, Clone)]
pub struct StepSecrets {
    pub s3_url: String,
    pub result_bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub knative_ingress: String,
    pub knative_custom_domain: String,
    pub local_cluster_deployment: bool,
    pub facade_url: Option<String>,
}

impl StepSecrets {
    pub fn load(dir: &Path) -> Result<Self> {
        let local_cluster_deployment = read_secret(dir, secret_files::LOCAL_CLUSTER_DEPLOYMENT)
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);
        let knative_custom_domain = read_secret(dir, secret_files::KNATIVE_CUSTOM_DOMAIN)
            .unwrap_or_else(|_| DEFAULT_CUSTOM_DOMAIN.to_string());
        let facade_url = if local_cluster_deployment {
            None
        } else {
            Some(read_secret(dir, secret_files::KFSERVING_URL)?)
        };

        Ok(StepSecrets {
            s3_url: read_secret(dir, secret_files::S3_URL)?,
            result_bucket: read_secret(dir, secret_files::RESULT_BUCKET)?,
            access_key_id: read_secret(dir, secret_files::S3_ACCESS_KEY_ID)?,
            secret_access_key: read_secret(dir, secret_files::S3_SECRET_ACCESS_KEY)?,
            knative_ingress: read_secret(dir, secret_files::KNATIVE_INGRESS)?,
            knative_custom_domain,
            local_cluster_deployment,
            facade_url,
        })
    }
}

/// Read a single-value credential file, trimming whitespace and quotes.
fn read_secret(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| BridgeError::Config(format!("cannot read secret '{}': {}", path.display(), e)))?;
    Ok(raw.trim().trim_matches('\'').to_string())
}

/// Build the deployment request from the flags and credentials.
pub fn build_request(args: &StepArgs, secrets: &StepSecrets) -> DeployRequest {
    DeployRequest {
        deployment_name: Some(args.deployment_name.clone()),
        container_image: Some(args.model_serving_image.clone()),
        model_file_name: Some(args.model_file_name.clone()),
        model_class_name: Some(args.model_class_name.clone()),
        model_class_file: Some(args.model_class_file.clone()),
        endpoint_url: Some(secrets.s3_url.clone()),
        access_key_id: Some(secrets.access_key_id.clone()),
        secret_access_key: Some(secrets.secret_access_key.clone()),
        training_results_bucket: Some(secrets.result_bucket.clone()),
        training_id: Some(args.model_id.clone()),
        check_status_only: false,
        delete_deployment: args.cleanup,
    }
}

/// The externally-reachable host the deployed model will be served under.
pub fn prediction_host(deployment_name: &str, namespace: &str, custom_domain: &str) -> String {
    format!("{}.{}.{}", deployment_name, namespace, custom_domain)
}

/// Augment a raw deploy result with the derived endpoint fields and strip
/// the upstream diagnostic payload.
pub fn finalize_metrics(
    mut metrics: Value,
    prediction_host: String,
    prediction_endpoint: String,
) -> Value {
    metrics["Prediction_Host"] = Value::String(prediction_host);
    metrics["Prediction_Endpoint"] = Value::String(prediction_endpoint);
    if let Some(map) = metrics.as_object_mut() {
        map.remove("details");
    }
    metrics
}

pub async fn run(args: StepArgs) -> anyhow::Result<()> {
    let secrets = StepSecrets::load(&args.secrets_dir)?;
    let config = Config::from_env()?;
    let request = build_request(&args, &secrets);
    let mode = Mode::from_request(&request);

    let metrics = if mode == Mode::Delete {
        let metrics = call(&config, &secrets, mode, &request).await?;
        info!("Successfully cleaned up old deployments");
        metrics
    } else {
        let metrics = call(&config, &secrets, mode, &request).await?;
        let host = prediction_host(
            &args.deployment_name,
            &config.namespace,
            &secrets.knative_custom_domain,
        );
        let metrics = finalize_metrics(metrics, host.clone(), secrets.knative_ingress.clone());

        if metrics["status"] != "Success" {
            warn!("deployment did not succeed: {}", metrics);
        }
        println!(
            "Endpoint IP for these models: {} . Model prediction host is {}",
            secrets.knative_ingress, host
        );
        metrics
    };

    std::fs::write(&args.metric_path, serde_json::to_string(&metrics)?)?;
    Ok(())
}

async fn call(
    config: &Config,
    secrets: &StepSecrets,
    mode: Mode,
    request: &DeployRequest,
) -> Result<Value> {
    match &secrets.facade_url {
        // Remote facade over HTTP
        Some(url) => {
            let client = reqwest::Client::new();
            let response = match mode {
                Mode::Delete => client.delete(url).query(request).send().await?,
                _ => client.post(url).json(request).send().await?,
            };
            Ok(response.json().await?)
        }
        // In-process against the local cluster
        None => {
            let kube_client = kube::Client::try_default()
                .await
                .map_err(BridgeError::from)?;
            let facade = Facade::new(kube_client, config.clone());
            Ok(facade.run_safe(mode, request).await)
        }
    }
}
