mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mentor_hub::config::HubConfig;

#[derive(Parser)]
#[command(name = "mentor-hub", version, about = "Mentor chat, tasks, notes and calendar backed by a local LLM")]
struct Cli {
    /// Config file to use instead of ~/.mentor-hub/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server
    Serve,
    /// Check the database and the generation service
    Doctor,
    /// Show record counts
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HubConfig::load_from(path)?,
        None => HubConfig::load()?,
    };

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => cli::serve(config).await?,
        Command::Doctor => cli::doctor::doctor(&config).await?,
        Command::Stats => cli::stats::stats(&config)?,
    }

    Ok(())
}
