// SPDX-License-Identifier: Apache-2.0

//! Startup-time model loading: fetch the weights file and submitted source
//! bundle from object storage, extract the bundle, and resolve the named
//! predictor. The resulting service object is built once and shared
//! read-only across request handlers.

use std::env;
use std::fs::File;
use std::path::Path;
use tracing::{info, instrument};

use crate::constants::env_keys;
use crate::error::{BridgeError, Result};
use crate::serving::predictor::{Predictor, PredictorRegistry};
use crate::serving::storage::ArtifactStore;

/// Serving-container configuration from environment variables.
#[derive(Debug, Clone)]
pub struct ServingConfig {
    pub training_id: String,
    pub endpoint_url: String,
    pub bucket_name: String,
    pub bucket_key: Option<String>,
    pub bucket_secret: Option<String>,
    pub model_file_name: String,
    pub model_class_name: String,
    pub model_class_file: String,
}

impl ServingConfig {
    pub fn from_env() -> Result<Self> {
        let required = |key: &str| {
            env::var(key).map_err(|_| BridgeError::Config(format!("{} is not set", key)))
        };

        Ok(ServingConfig {
            training_id: required(env_keys::TRAINING_ID)?,
            endpoint_url: required(env_keys::BUCKET_ENDPOINT_URL)?,
            bucket_name: required(env_keys::BUCKET_NAME)?,
            bucket_key: env::var(env_keys::BUCKET_KEY).ok(),
            bucket_secret: env::var(env_keys::BUCKET_SECRET).ok(),
            model_file_name: required(env_keys::MODEL_FILE_NAME)?,
            model_class_name: required(env_keys::MODEL_CLASS_NAME)?,
            model_class_file: required(env_keys::MODEL_CLASS_FILE)?,
        })
    }

    /// Object key of the model weights file.
    pub fn model_key(&self) -> String {
        format!("{}/{}", self.training_id, self.model_file_name)
    }

    /// Object key of the zipped source bundle submitted with the training.
    pub fn bundle_key(&self) -> String {
        format!("{}/_submitted_code/model.zip", self.training_id)
    }
}

/// The loaded model, held for the process lifetime.
pub struct ModelService {
    predictor: Box<dyn Predictor>,
}

impl ModelService {
    /// Download artifacts, extract the source bundle, and load the named
    /// predictor from the weights file.
    #[instrument(skip_all, fields(training_id = %config.training_id, model_class = %config.model_class_name))]
    pub async fn load(
        config: &ServingConfig,
        store: &dyn ArtifactStore,
        registry: &PredictorRegistry,
        work_dir: &Path,
    ) -> Result<Self> {
        let model_path = work_dir.join(&config.model_file_name);
        store.fetch(&config.model_key(), &model_path).await?;
        info!("downloaded model weights '{}'", config.model_key());

        let bundle_path = work_dir.join("model.zip");
        store.fetch(&config.bundle_key(), &bundle_path).await?;
        extract_bundle(&bundle_path, &work_dir.join("model_files"))?;
        info!("extracted source bundle '{}'", config.bundle_key());

        let predictor = registry.load(&config.model_class_name, &model_path)?;
        info!("loaded predictor '{}'", config.model_class_name);

        Ok(Self { predictor })
    }

    pub fn from_predictor(predictor: Box<dyn Predictor>) -> Self {
        Self { predictor }
    }

    pub fn predict_batch(&self, inputs: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        inputs
            .iter()
            .map(|input| self.predictor.predict(input))
            .collect()
    }
}

fn extract_bundle(bundle: &Path, dest: &Path) -> Result<()> {
    let file = File::open(bundle)
        .map_err(|e| BridgeError::ModelLoad(format!("cannot open source bundle: {}", e)))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| BridgeError::ModelLoad(format!("source bundle is not a zip: {}", e)))?;
    archive
        .extract(dest)
        .map_err(|e| BridgeError::ModelLoad(format!("bundle extraction failed: {}", e)))?;
    Ok(())
}
