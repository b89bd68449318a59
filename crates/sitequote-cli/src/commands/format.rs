//! Format command implementation

use crate::cli::FormatArgs;
use crate::output::OutputWriter;
use crate::output_types::FormatOutput;
use anyhow::Result;
use sitequote_core::config::LayeredConfig;
use sitequote_core::units::{format_area, format_length};

pub fn execute(args: FormatArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let formatted = FormatOutput {
        area: args.area.map(format_area),
        length: args.length.map(format_length),
    };

    if output.is_json() {
        return output.result(formatted);
    }

    let system = config.unit_system.value;
    if let Some(area) = &formatted.area {
        output.kv("Area", area.in_system(system));
    }
    if let Some(length) = &formatted.length {
        output.kv("Length", length.in_system(system));
    }

    Ok(())
}
