//! Quote command implementation

use crate::cli::QuoteArgs;
use crate::output::{money, OutputWriter};
use crate::output_types::QuoteLineRow;
use anyhow::{Context, Result};
use sitequote_core::config::LayeredConfig;
use sitequote_core::models::{MeasurementDocument, PricingOverrides};
use sitequote_engine::QuoteSession;

use super::read_json;

pub fn execute(args: QuoteArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let document: MeasurementDocument = read_json(&args.document)?;
    let registry = config.template_registry()?;

    let mut overrides = PricingOverrides::new();
    for (service_id, rate) in args.rates {
        if registry.get(&service_id).is_none() {
            output.warning(format!("Rate override for unknown service '{}' ignored", service_id));
        }
        overrides = overrides.rate(service_id, rate);
    }
    for (service_id, minimum) in args.minimums {
        if registry.get(&service_id).is_none() {
            output.warning(format!("Minimum override for unknown service '{}' ignored", service_id));
        }
        overrides = overrides.minimum(service_id, minimum);
    }

    let session = QuoteSession::from_document(registry, overrides, &document)
        .with_context(|| format!("Failed to replay document {}", document.id))?;
    let quote = session.quote();

    let priced = session
        .store()
        .geometries()
        .iter()
        .filter(|geometry| quote.line(&geometry.service_id).is_some())
        .count();
    if priced < session.store().len() {
        tracing::info!(
            unpriced = session.store().len() - priced,
            "Some geometries belong to services outside the catalog"
        );
    }

    if output.is_json() {
        output.result(quote)?;
    } else {
        output.section(format!("{} ({})", document.name, document.job_id));
        output.table(quote.lines.iter().map(QuoteLineRow::from).collect());
        output.kv("Total", money(quote.total));
    }

    Ok(())
}
