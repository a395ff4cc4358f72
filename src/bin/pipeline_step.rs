// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;

use kfbridge::invoker::{run, StepArgs};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = StepArgs::parse();
    run(args).await
}
