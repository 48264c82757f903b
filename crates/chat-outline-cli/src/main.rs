//! chat-outline CLI - chat callouts as headings in markdown outlines

use anyhow::{Context, Result};
use chat_outline_core::Config;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = load_config(&cli)?;
    execute_command(cli.command, &config).await
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

async fn execute_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Scan { file, format } => commands::scan(&file, format, config).await,
        Commands::Outline { file, format } => commands::outline(&file, format, config).await,
    }
}
