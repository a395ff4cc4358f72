// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use std::sync::Arc;
use tracing::info;

use kfbridge::config::Config;
use kfbridge::facade::Facade;
use kfbridge::server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={} template={}",
        config.namespace, config.template_path
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let port = config.port;
    let facade = Facade::new(client, config);
    serve(Arc::new(AppState { facade }), port).await?;
    Ok(())
}
