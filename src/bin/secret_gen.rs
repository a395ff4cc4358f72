// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use kube::Client;

use kfbridge::config::Config;
use kfbridge::secrets::{parse_literals, provision_secret, write_secret_name, SecretGenArgs};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = SecretGenArgs::parse();
    let literals = parse_literals(&args.params)?;
    let config = Config::from_env()?;

    let client = Client::try_default().await?;
    provision_secret(client, &config.namespace, &args.secret_name, literals).await?;

    // Pass the secret name forward to the next pipeline step
    write_secret_name(&args.output_secret_name_file, &args.secret_name)?;
    Ok(())
}
