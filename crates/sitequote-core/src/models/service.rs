//! Priced service definitions selected before drawing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{QuoteError, Result};

/// What a service measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasurementType {
    #[serde(alias = "area")]
    Area,
    #[serde(alias = "length")]
    Length,
    #[serde(alias = "count")]
    Count,
}

impl MeasurementType {
    /// The unit a measurement of this type is priced in
    pub fn default_unit(&self) -> UnitLabel {
        match self {
            MeasurementType::Area => UnitLabel::Sqft,
            MeasurementType::Length => UnitLabel::Ft,
            MeasurementType::Count => UnitLabel::Ea,
        }
    }
}

/// Unit label shown next to a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitLabel {
    Sqft,
    Ft,
    Ea,
}

impl fmt::Display for UnitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitLabel::Sqft => "sqft",
            UnitLabel::Ft => "ft",
            UnitLabel::Ea => "ea",
        };
        f.write_str(label)
    }
}

/// A priced unit-rate definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTemplate {
    pub id: String,
    pub name: String,
    pub measurement_type: MeasurementType,
    pub unit_label: UnitLabel,
    /// Currency per unit
    pub default_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_charge: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ServiceTemplate {
    /// Create a template whose unit follows its measurement type
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        measurement_type: MeasurementType,
        default_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            measurement_type,
            unit_label: measurement_type.default_unit(),
            default_rate,
            minimum_charge: None,
            description: None,
        }
    }

    /// Set the minimum charge
    pub fn with_minimum(mut self, minimum_charge: f64) -> Self {
        self.minimum_charge = Some(minimum_charge);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the identity and rate fields
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(QuoteError::MissingId { entity: format!("Service template '{}'", self.name) });
        }

        if !self.default_rate.is_finite() || self.default_rate <= 0.0 {
            return Err(QuoteError::InvalidRate {
                id: self.id.clone(),
                reason: format!("default rate must be positive, got {}", self.default_rate),
            });
        }

        if let Some(minimum) = self.minimum_charge {
            if !minimum.is_finite() || minimum < 0.0 {
                return Err(QuoteError::InvalidRate {
                    id: self.id.clone(),
                    reason: format!("minimum charge must be non-negative, got {}", minimum),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_follows_measurement_type() {
        let template = ServiceTemplate::new("crack", "Crack Filling", MeasurementType::Length, 1.5);
        assert_eq!(template.unit_label, UnitLabel::Ft);
        assert!(template.minimum_charge.is_none());
    }

    #[test]
    fn test_template_wire_format() {
        let json = r#"{
            "id": "paint",
            "name": "Exterior Paint",
            "measurementType": "AREA",
            "unitLabel": "sqft",
            "defaultRate": 0.35,
            "minimumCharge": 350
        }"#;

        let template: ServiceTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.measurement_type, MeasurementType::Area);
        assert_eq!(template.unit_label, UnitLabel::Sqft);
        assert_eq!(template.minimum_charge, Some(350.0));
    }

    #[test]
    fn test_validate_rejects_bad_templates() {
        let missing_id = ServiceTemplate::new("  ", "Nameless", MeasurementType::Area, 1.0);
        assert!(matches!(missing_id.validate(), Err(QuoteError::MissingId { .. })));

        let zero_rate = ServiceTemplate::new("free", "Free", MeasurementType::Area, 0.0);
        assert!(matches!(zero_rate.validate(), Err(QuoteError::InvalidRate { .. })));

        let negative_min =
            ServiceTemplate::new("neg", "Negative", MeasurementType::Count, 5.0).with_minimum(-1.0);
        assert!(negative_min.validate().is_err());
    }
}
