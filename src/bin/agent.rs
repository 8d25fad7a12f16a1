//! metrics-agent - samples runtime metrics and reports them to the collector

#![allow(missing_docs)]

use clap::Parser;
use metrics_relay::config::AgentArgs;
use metrics_relay::utils::logging::init_tracing;
use metrics_relay::{Agent, Result};
use std::process::ExitCode;

async fn run() -> Result<()> {
    let args = AgentArgs::parse();
    let config = args.load().await?;
    init_tracing(&config.logging)?;

    Agent::new(config)?.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
