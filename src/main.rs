//! Hospital admin console
//!
//! Main entry point: loads configuration, builds the API client and
//! hands control to the interactive console.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hospital_admin::api::HospitalClient;
use hospital_admin::config::{self, Cli};
use hospital_admin::ui::Console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let cli = Cli::parse();
    let settings = config::load(&cli).context("Failed to load configuration")?;

    let client = HospitalClient::new(&settings).context("Failed to build the API client")?;
    Console::new(client).run().await
}
