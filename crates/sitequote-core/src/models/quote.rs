use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::service::UnitLabel;

/// One priced row of a quote, aggregated over every geometry of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub service_id: String,
    pub service_name: String,
    pub qty: f64,
    pub unit_label: UnitLabel,
    pub rate: f64,
    pub subtotal: f64,
    pub min_applied: bool,
}

/// Priced lines plus the grand total
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub lines: Vec<QuoteLine>,
    pub total: f64,
}

impl QuoteSummary {
    /// Find the line for a service
    pub fn line(&self, service_id: &str) -> Option<&QuoteLine> {
        self.lines.iter().find(|line| line.service_id == service_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Sparse per-service pricing overrides; absence means the template default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOverrides {
    #[serde(default)]
    pub rates: HashMap<String, f64>,
    #[serde(default)]
    pub minimums: HashMap<String, f64>,
}

impl PricingOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the unit rate of a service
    pub fn rate(mut self, service_id: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(service_id.into(), rate);
        self
    }

    /// Override the minimum charge of a service
    pub fn minimum(mut self, service_id: impl Into<String>, minimum: f64) -> Self {
        self.minimums.insert(service_id.into(), minimum);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty() && self.minimums.is_empty()
    }
}
