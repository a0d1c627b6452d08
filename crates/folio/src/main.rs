//! Folio CLI binary.
//!
//! This binary provides command-line access to a content space:
//! - Read any path, including management API paths
//! - Read every page of a collection
//! - Read a single story with its relations resolved

use clap::Parser;
use folio::{ClientConfig, FolioClient, ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, run_command};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_forced_log_level("debug");
    }
    init_observability(observability)?;

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::load()?,
    };
    let client = FolioClient::new(config);

    let output = run_command(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
