use anyhow::{Context, Result};
use sitequote_core::config::{parse_unit_system, CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory when --config is absent
pub const DEFAULT_CONFIG_FILE: &str = "sitequote.toml";

/// Build the layered configuration: defaults, then file, env, and CLI flags
pub fn load_layered_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match &cli.config {
        Some(path) => {
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                config = config.load_from_file(default_path).with_context(|| {
                    format!("Failed to load config file {}", default_path.display())
                })?;
            }
        }
    }

    let mut config = config.load_from_env();
    config.update_from_cli(cli_overrides(cli)?);

    Ok(config)
}

fn cli_overrides(cli: &Cli) -> Result<CliConfigOverrides> {
    let unit_system = cli.units.as_deref().map(parse_unit_system).transpose()?;

    Ok(CliConfigOverrides {
        industry: cli.industry.clone(),
        unit_system,
        templates_file: cli.templates.clone(),
        concrete_rules_file: cli.rules.clone(),
    })
}

/// Path the configuration was read from, for display
pub fn config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(|| {
        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        default_path.exists().then_some(default_path)
    })
}
