//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use sitequote_core::config::LayeredConfig;
use std::path::Path;

pub fn execute(
    config: &LayeredConfig,
    source_file: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();

    // Sort by key for consistent output
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.section("Configuration Values");
    output.table(rows);

    if !output.is_json() {
        match source_file {
            Some(path) => output.info(format!("Config file: {}", path.display())),
            None => output.info("No config file loaded"),
        }
        output.section("Configuration Precedence");
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}
