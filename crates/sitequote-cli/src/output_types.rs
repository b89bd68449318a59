use serde::Serialize;
use sitequote_core::models::{QuoteLine, ServiceTemplate};
use sitequote_core::units::FormattedMeasurement;
use tabled::Tabled;

use crate::output::money;

/// One row of the templates table
#[derive(Debug, Serialize, Tabled)]
pub struct TemplateRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Service")]
    pub name: String,
    #[tabled(rename = "Unit")]
    pub unit: String,
    #[tabled(rename = "Rate")]
    pub rate: f64,
    #[tabled(rename = "Minimum", display_with = "display_minimum")]
    pub minimum: Option<f64>,
}

fn display_minimum(minimum: &Option<f64>) -> String {
    minimum.map(money).unwrap_or_else(|| "-".to_string())
}

impl From<&ServiceTemplate> for TemplateRow {
    fn from(template: &ServiceTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            unit: template.unit_label.to_string(),
            rate: template.default_rate,
            minimum: template.minimum_charge,
        }
    }
}

/// One row of the quote table
#[derive(Debug, Serialize, Tabled)]
pub struct QuoteLineRow {
    #[tabled(rename = "Service")]
    pub service: String,
    #[tabled(rename = "Qty")]
    pub quantity: String,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Subtotal")]
    pub subtotal: String,
    #[tabled(rename = "Min")]
    pub minimum: &'static str,
}

impl From<&QuoteLine> for QuoteLineRow {
    fn from(line: &QuoteLine) -> Self {
        Self {
            service: line.service_name.clone(),
            quantity: format!("{:.2} {}", line.qty, line.unit_label),
            rate: format!("{}/{}", money(line.rate), line.unit_label),
            subtotal: money(line.subtotal),
            minimum: if line.min_applied { "yes" } else { "" },
        }
    }
}

/// One row of the concrete takeoff table
#[derive(Debug, Serialize, Tabled)]
pub struct ConcreteItemRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Qty")]
    pub quantity: String,
    #[tabled(rename = "Total")]
    pub total: String,
}

/// One row of the stall tick table
#[derive(Debug, Serialize, Tabled)]
pub struct TickRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "From")]
    pub from: String,
    #[tabled(rename = "To")]
    pub to: String,
}

/// One row of the configuration table
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// Output for the format command
#[derive(Debug, Serialize)]
pub struct FormatOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<FormattedMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<FormattedMeasurement>,
}
