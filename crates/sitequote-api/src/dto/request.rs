use serde::Deserialize;
use sitequote_core::models::{
    ConcreteMeasurement, Geometry, GeometryKind, PricingOverrides, QuoteMode, ServiceTemplate,
    ShapePayload,
};
use sitequote_core::pricing::ConcretePricingRules;
use sitequote_geo::{StallTickRequest, WebMercatorViewport};

/// Quote computation request body.
///
/// Inline `templates` win over `industry`; with neither the server's default
/// catalog is used.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeQuoteRequest {
    pub industry: Option<String>,
    pub templates: Option<Vec<ServiceTemplate>>,
    #[serde(default)]
    pub geometries: Vec<Geometry>,
    #[serde(default)]
    pub overrides: PricingOverrides,
}

/// Concrete takeoff request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteQuoteRequest {
    #[serde(default)]
    pub measurements: Vec<ConcreteMeasurement>,
    pub rules: Option<ConcretePricingRules>,
}

/// Stall tick request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StallTicksRequest {
    pub viewport: WebMercatorViewport,
    pub row: StallTickRequest,
}

/// New measurement document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementRequest {
    pub job_id: String,
    pub name: String,
    #[serde(default)]
    pub mode: QuoteMode,
    #[serde(default)]
    pub geometries: Vec<Geometry>,
}

/// Raw shape to measure in the unit its kind is priced in
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureRequest {
    #[serde(default = "default_measure_id")]
    pub id: String,
    pub kind: GeometryKind,
    pub shape: ShapePayload,
    /// Photo calibration; required for photo polygons and polylines
    pub pixels_per_foot: Option<f64>,
}

fn default_measure_id() -> String {
    "shape".to_string()
}

/// Unit formatting request body; either field may be given
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub square_meters: Option<f64>,
    pub meters: Option<f64>,
}

/// Query string for replaying a stored document
#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    pub industry: Option<String>,
}
