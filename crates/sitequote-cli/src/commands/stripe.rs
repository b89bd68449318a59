//! Stripe command implementation

use crate::cli::StripeArgs;
use crate::output::OutputWriter;
use anyhow::{bail, Result};
use sitequote_geo::striping_layout;

pub fn execute(args: StripeArgs, output: &OutputWriter) -> Result<()> {
    for (name, value) in [
        ("row length", args.row_length),
        ("stall width", args.stall_width),
        ("stall depth", args.stall_depth),
    ] {
        if !value.is_finite() || value <= 0.0 {
            bail!("{} must be a positive number of feet, got {}", name, value);
        }
    }

    let layout =
        striping_layout(args.row_length, args.stall_width, args.stall_depth, args.include_ends);

    if output.is_json() {
        output.result(layout)?;
    } else {
        output.section("Striping layout");
        output.kv("Stalls", layout.stall_count);
        output.kv("Lines", layout.line_count);
        output.kv("Lineal feet", format!("{:.1} ft", layout.lineal_feet));
    }

    Ok(())
}
