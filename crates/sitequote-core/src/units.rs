//! Unit conversion and human-readable measurement formatting.
//!
//! Drawing surfaces measure in square meters and meters. The engine prices
//! in square feet and linear feet, and the UI shows whichever unit fits the
//! magnitude of the value.

use serde::{Deserialize, Serialize};

pub const SQ_FEET_PER_SQ_METER: f64 = 10.763_910_416_709_722;
pub const FEET_PER_METER: f64 = 3.280_839_895_013_123;
pub const SQ_FEET_PER_ACRE: f64 = 43_560.0;
pub const SQ_FEET_PER_SQ_MILE: f64 = 27_878_400.0;
pub const FEET_PER_MILE: f64 = 5_280.0;
pub const SQ_METERS_PER_HECTARE: f64 = 10_000.0;
pub const SQ_METERS_PER_SQ_KM: f64 = 1_000_000.0;
pub const METERS_PER_KM: f64 = 1_000.0;

/// Preferred display system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

/// A measurement rendered in both unit systems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMeasurement {
    pub metric: String,
    pub imperial: String,
}

impl FormattedMeasurement {
    /// The rendering for a unit system
    pub fn in_system(&self, system: UnitSystem) -> &str {
        match system {
            UnitSystem::Imperial => &self.imperial,
            UnitSystem::Metric => &self.metric,
        }
    }
}

pub fn square_meters_to_square_feet(square_meters: f64) -> f64 {
    square_meters * SQ_FEET_PER_SQ_METER
}

pub fn square_feet_to_square_meters(square_feet: f64) -> f64 {
    square_feet / SQ_FEET_PER_SQ_METER
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

pub fn feet_to_meters(feet: f64) -> f64 {
    feet / FEET_PER_METER
}

/// Format an area given in square meters
pub fn format_area(square_meters: f64) -> FormattedMeasurement {
    let square_meters = sanitize(square_meters);
    let square_feet = square_meters_to_square_feet(square_meters);

    // Step up on the displayed value so 9,999.6 m² reads 1.00 ha
    let hectares = round_to(square_meters / SQ_METERS_PER_HECTARE, 2);
    let metric = if round_to(square_meters, 0) < SQ_METERS_PER_HECTARE {
        format!("{} m²", group_thousands(square_meters))
    } else if hectares < SQ_METERS_PER_SQ_KM / SQ_METERS_PER_HECTARE {
        format!("{:.2} ha", hectares)
    } else {
        format!("{:.2} km²", square_meters / SQ_METERS_PER_SQ_KM)
    };

    let acres = round_to(square_feet / SQ_FEET_PER_ACRE, 2);
    let imperial = if round_to(square_feet, 0) < SQ_FEET_PER_ACRE {
        format!("{} ft²", group_thousands(square_feet))
    } else if acres < SQ_FEET_PER_SQ_MILE / SQ_FEET_PER_ACRE {
        format!("{:.2} ac", acres)
    } else {
        format!("{:.2} mi²", square_feet / SQ_FEET_PER_SQ_MILE)
    };

    FormattedMeasurement { metric, imperial }
}

/// Format a length given in meters
pub fn format_length(meters: f64) -> FormattedMeasurement {
    let meters = sanitize(meters);
    let feet = meters_to_feet(meters);

    let shown = round_to(meters, 1);
    let metric = if shown < METERS_PER_KM {
        format!("{:.1} m", shown)
    } else {
        format!("{:.2} km", meters / METERS_PER_KM)
    };

    let imperial = if round_to(feet, 0) < FEET_PER_MILE {
        format!("{} ft", group_thousands(feet))
    } else {
        format!("{:.2} mi", feet / FEET_PER_MILE)
    };

    FormattedMeasurement { metric, imperial }
}

/// Round to a whole number and insert thousands separators
pub fn group_thousands(value: f64) -> String {
    let rounded = sanitize(value).round() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Round half away from zero at a number of decimal places
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
