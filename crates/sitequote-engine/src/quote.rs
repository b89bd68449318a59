use sitequote_core::models::{Geometry, PricingOverrides, QuoteLine, QuoteSummary, ServiceTemplate};
use std::collections::HashMap;

/// Price a set of geometries against an ordered template catalog.
///
/// Geometries are grouped by service and each group becomes one line, in
/// catalog order. A geometry whose service is not in the catalog is dropped.
/// The minimum charge lifts a positive subtotal that falls short of it; a
/// zero subtotal stays zero.
pub fn compute_quote_lines(
    templates: &[ServiceTemplate],
    geometries: &[Geometry],
    overrides: &PricingOverrides,
) -> QuoteSummary {
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for geometry in geometries {
        let value = geometry.measurement_value.max(0.0);
        groups.entry(geometry.service_id.as_str()).or_default().push(value);
    }

    for service_id in groups.keys() {
        if !templates.iter().any(|template| template.id == *service_id) {
            tracing::debug!(service_id, "Skipping geometries for unknown service");
        }
    }

    let mut summary = QuoteSummary::default();

    for template in templates {
        let Some(values) = groups.get_mut(template.id.as_str()) else {
            continue;
        };

        let qty = sum_canonical(values);
        let rate = effective_rate(template, overrides);
        let minimum = effective_minimum(template, overrides);

        let raw = qty * rate;
        let min_applied = minimum > 0.0 && raw > 0.0 && raw < minimum;
        let subtotal = if min_applied { minimum } else { raw };

        summary.total += subtotal;
        summary.lines.push(QuoteLine {
            service_id: template.id.clone(),
            service_name: template.name.clone(),
            qty,
            unit_label: template.unit_label,
            rate,
            subtotal,
            min_applied,
        });
    }

    summary
}

/// Sum in sorted order so any permutation of the input gives the same bits
fn sum_canonical(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

fn effective_rate(template: &ServiceTemplate, overrides: &PricingOverrides) -> f64 {
    match overrides.rates.get(&template.id) {
        Some(rate) if rate.is_finite() && *rate >= 0.0 => *rate,
        Some(rate) => {
            tracing::warn!(service_id = %template.id, rate, "Ignoring invalid rate override");
            template.default_rate
        }
        None => template.default_rate,
    }
}

fn effective_minimum(template: &ServiceTemplate, overrides: &PricingOverrides) -> f64 {
    match overrides.minimums.get(&template.id) {
        Some(minimum) if minimum.is_finite() && *minimum >= 0.0 => *minimum,
        Some(minimum) => {
            tracing::warn!(service_id = %template.id, minimum, "Ignoring invalid minimum override");
            template.minimum_charge.unwrap_or(0.0)
        }
        None => template.minimum_charge.unwrap_or(0.0),
    }
}
