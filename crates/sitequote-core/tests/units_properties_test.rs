//! Property tests for measurement formatting and concrete tiers

use proptest::prelude::*;
use sitequote_core::pricing::ConcretePricingRules;
use sitequote_core::units::{format_area, format_length, FEET_PER_METER, SQ_FEET_PER_SQ_METER};

/// Split "1,234 m²" into its number and unit
fn parse(rendered: &str) -> (f64, String) {
    let (number, unit) = rendered.split_once(' ').expect("number and unit");
    (number.replace(',', "").parse().expect("numeric part"), unit.to_string())
}

proptest! {
    #[test]
    fn prop_length_reads_back(meters in 0.0f64..5_000_000.0) {
        let formatted = format_length(meters);

        let (value, unit) = parse(&formatted.metric);
        let (back, tolerance) = match unit.as_str() {
            "m" => {
                prop_assert!(value < 1_000.0);
                (value, 0.05)
            }
            "km" => (value * 1_000.0, 5.0),
            other => return Err(TestCaseError::fail(format!("unexpected unit {}", other))),
        };
        prop_assert!((back - meters).abs() <= tolerance + 1e-6);

        let feet = meters * FEET_PER_METER;
        let (value, unit) = parse(&formatted.imperial);
        let (back, tolerance) = match unit.as_str() {
            "ft" => {
                prop_assert!(value < 5_280.0);
                (value, 0.5)
            }
            "mi" => (value * 5_280.0, 0.005 * 5_280.0),
            other => return Err(TestCaseError::fail(format!("unexpected unit {}", other))),
        };
        prop_assert!((back - feet).abs() <= tolerance + 1e-6);
    }

    #[test]
    fn prop_area_reads_back(square_meters in 0.0f64..50_000_000.0) {
        let formatted = format_area(square_meters);

        let (value, unit) = parse(&formatted.metric);
        let (back, tolerance) = match unit.as_str() {
            "m²" => {
                prop_assert!(value < 10_000.0);
                (value, 0.5)
            }
            "ha" => {
                prop_assert!(value < 100.0);
                (value * 10_000.0, 50.0)
            }
            "km²" => (value * 1_000_000.0, 5_000.0),
            other => return Err(TestCaseError::fail(format!("unexpected unit {}", other))),
        };
        prop_assert!((back - square_meters).abs() <= tolerance + 1e-6);

        let square_feet = square_meters * SQ_FEET_PER_SQ_METER;
        let (value, unit) = parse(&formatted.imperial);
        let (back, tolerance) = match unit.as_str() {
            "ft²" => {
                prop_assert!(value < 43_560.0);
                (value, 0.5)
            }
            "ac" => {
                prop_assert!(value < 640.0);
                (value * 43_560.0, 0.005 * 43_560.0)
            }
            "mi²" => (value * 27_878_400.0, 0.005 * 27_878_400.0),
            other => return Err(TestCaseError::fail(format!("unexpected unit {}", other))),
        };
        prop_assert!((back - square_feet).abs() <= tolerance + 1e-3);
    }

    #[test]
    fn prop_thicker_slabs_never_price_lower(a in 0.0f64..12.0, b in 0.0f64..12.0) {
        let rules = ConcretePricingRules::default();
        let (thin, thick) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rules.thickness_rate(thin) <= rules.thickness_rate(thick));
    }
}
