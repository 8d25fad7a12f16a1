//! metrics-server - collector for agent reports
//!
//! Flags override the YAML file given by `-c`, which overrides the defaults.

#![allow(missing_docs)]

use clap::Parser;
use metrics_relay::config::ServerArgs;
use metrics_relay::utils::logging::init_tracing;
use metrics_relay::{HttpServer, Result};
use std::process::ExitCode;

async fn run() -> Result<()> {
    let args = ServerArgs::parse();
    let config = args.load().await?;
    init_tracing(&config.logging)?;

    let server = HttpServer::new(&config).await?;
    server.start().await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, to keep the message readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
