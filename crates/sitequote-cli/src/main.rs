//! SiteQuote CLI - Command-line interface
//!
//! Quotes saved measurement documents, prices concrete takeoffs and lays
//! out parking stall striping from the terminal.

mod cli;
mod commands;
mod config;
mod output;
mod output_types;

use clap::Parser;
use cli::Cli;
use output::OutputWriter;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let json = cli.json;

    if let Err(e) = commands::execute(cli) {
        OutputWriter::new(json).error(format!("{:#}", e));
        std::process::exit(1);
    }
}
