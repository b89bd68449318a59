//! Command implementations

mod concrete;
mod config;
mod format;
mod quote;
mod stripe;
mod templates;
mod ticks;

use crate::cli::{Cli, Commands};
use crate::config::{config_path, load_layered_config};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_layered_config(&cli)?;
    let source_file = config_path(&cli);

    match cli.command {
        Commands::Templates => templates::execute(&config, &output),
        Commands::Quote(args) => quote::execute(args, &config, &output),
        Commands::Concrete(args) => concrete::execute(args, &config, &output),
        Commands::Ticks(args) => ticks::execute(args, &output),
        Commands::Stripe(args) => stripe::execute(args, &output),
        Commands::Format(args) => format::execute(args, &config, &output),
        Commands::Config => config::execute(&config, source_file.as_deref(), &output),
    }
}

/// Read and deserialize a JSON input file
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
