use serde::Serialize;
use sitequote_core::models::{ServiceTemplate, UnitLabel};
use sitequote_core::units::FormattedMeasurement;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "sitequote-api" }
    }
}

/// Built-in industry catalog summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryResponse {
    pub name: String,
    pub template_count: usize,
}

/// Templates of one catalog, in quote order
#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub industry: String,
    pub templates: Vec<ServiceTemplate>,
}

/// Stall ticks as GeoJSON plus the count
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StallTicksResponse {
    pub tick_count: usize,
    pub features: geojson::FeatureCollection,
}

/// Measured quantity of one shape
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureResponse {
    pub value: f64,
    pub unit_label: UnitLabel,
}

/// Formatted measurements
#[derive(Debug, Serialize)]
pub struct FormatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<FormattedMeasurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<FormattedMeasurement>,
}

/// Delete operation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn success(entity: &str, id: &str) -> Self {
        Self { success: true, message: format!("Successfully deleted {} {}", entity, id) }
    }
}
