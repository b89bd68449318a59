//! Templates command implementation

use crate::output::OutputWriter;
use crate::output_types::TemplateRow;
use anyhow::Result;
use sitequote_core::config::LayeredConfig;

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let registry = config.template_registry()?;

    output.section(format!("Service templates: {}", registry.industry));
    output.table(registry.templates().iter().map(TemplateRow::from).collect());

    Ok(())
}
