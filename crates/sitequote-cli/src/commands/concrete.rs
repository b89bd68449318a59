//! Concrete command implementation

use crate::cli::ConcreteArgs;
use crate::output::{money, OutputWriter};
use crate::output_types::ConcreteItemRow;
use anyhow::Result;
use serde::Deserialize;
use sitequote_core::config::LayeredConfig;
use sitequote_core::models::ConcreteMeasurement;
use sitequote_engine::ConcreteTakeoff;

use super::read_json;

/// Either a bare array or `{ "measurements": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum TakeoffFile {
    List(Vec<ConcreteMeasurement>),
    Wrapped { measurements: Vec<ConcreteMeasurement> },
}

pub fn execute(args: ConcreteArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let measurements = match read_json::<TakeoffFile>(&args.measurements)? {
        TakeoffFile::List(measurements) => measurements,
        TakeoffFile::Wrapped { measurements } => measurements,
    };

    // Goes through the takeoff so conflicting ids are rejected
    let takeoff = ConcreteTakeoff::with_measurements(config.concrete_rules()?, measurements)?;
    let result = takeoff.result();

    if output.is_json() {
        output.result(result)?;
        return Ok(());
    }

    let rows = result
        .items
        .iter()
        .map(|item| ConcreteItemRow {
            id: item.label.clone().unwrap_or_else(|| item.measurement_id.clone()),
            description: item.description.clone(),
            quantity: format!("{:.2} {}", item.quantity, item.unit_label),
            total: money(item.total),
        })
        .collect();

    output.section("Concrete takeoff");
    output.table(rows);

    output.section("Subtotals");
    for (category, amount) in result.subtotals.iter() {
        if amount != 0.0 {
            output.kv(category.as_str(), money(amount));
        }
    }

    output.section("Totals");
    output.kv("Slab area", format!("{:.2} sqft", result.total_sqft));
    output.kv("Volume", format!("{:.2} yd³", result.total_cubic_yards));
    output.kv("Lineal feet", format!("{:.2} ft", result.total_lineal_feet));
    output.kv("Total", money(result.total));

    Ok(())
}
