// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use kfbridge::constants::DEFAULT_PORT;
use kfbridge::serving::server::serve;
use kfbridge::serving::{HttpArtifactStore, ModelService, PredictorRegistry, ServingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServingConfig::from_env()?;
    info!(
        "Loading model '{}' for training '{}'",
        config.model_class_name, config.training_id
    );

    let store = HttpArtifactStore::new(
        &config.endpoint_url,
        &config.bucket_name,
        config.bucket_key.clone(),
        config.bucket_secret.clone(),
    );
    let work_dir = std::env::current_dir()?;
    let service =
        ModelService::load(&config, &store, &PredictorRegistry::builtin(), &work_dir).await?;
    info!("Model loaded, starting server");

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    serve(Arc::new(service), port).await?;
    Ok(())
}
