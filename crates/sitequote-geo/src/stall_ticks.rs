//! Stall divider ticks along a drawn parking row.
//!
//! Ticks are laid out in screen space so a zoomed-out row that would render
//! as a smudge produces nothing. Results are recomputed on every pan or zoom
//! frame and are never persisted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::viewport::{meters_per_pixel, LngLat, MapProjector, ScreenPoint};

/// Rows shorter than this on screen produce no ticks
pub const MIN_ROW_PIXELS: f64 = 6.0;

/// Stalls narrower than this on screen produce no ticks
pub const MIN_STALL_PIXELS: f64 = 1.0;

/// Upper bound on ticks for one row; anything denser is not drawn
pub const MAX_TICKS: usize = 1_000;

/// `kind` property that tells ticks apart from the row line itself
pub const STALL_TICK_KIND: &str = "stall_tick";

/// Tick length used when the request does not give a usable one
pub const DEFAULT_TICK_LENGTH_FT: f64 = 18.0;

const METERS_PER_FOOT: f64 = 0.3048;

fn default_tick_length() -> f64 {
    DEFAULT_TICK_LENGTH_FT
}

/// A parking row to divide into stalls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StallTickRequest {
    pub start: LngLat,
    pub end: LngLat,
    pub stall_width_ft: f64,
    #[serde(default = "default_tick_length")]
    pub tick_length_ft: f64,
    #[serde(default)]
    pub include_ends: bool,
    /// Extra properties copied onto every tick
    #[serde(default)]
    pub feature_props: Map<String, Value>,
}

impl StallTickRequest {
    pub fn new(start: LngLat, end: LngLat, stall_width_ft: f64) -> Self {
        Self {
            start,
            end,
            stall_width_ft,
            tick_length_ft: DEFAULT_TICK_LENGTH_FT,
            include_ends: false,
            feature_props: Map::new(),
        }
    }

    pub fn with_tick_length(mut self, tick_length_ft: f64) -> Self {
        self.tick_length_ft = tick_length_ft;
        self
    }

    pub fn with_ends(mut self, include_ends: bool) -> Self {
        self.include_ends = include_ends;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.feature_props.insert(key.into(), value.into());
        self
    }
}

/// One perpendicular tick segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StallTickFeature {
    pub index: usize,
    pub kind: String,
    pub coordinates: [LngLat; 2],
    pub properties: Map<String, Value>,
}

impl From<StallTickFeature> for geojson::Feature {
    fn from(tick: StallTickFeature) -> Self {
        let mut properties = tick.properties;
        properties.insert("index".to_string(), Value::from(tick.index));
        properties.insert("kind".to_string(), Value::from(tick.kind));

        let line = geojson::Value::LineString(
            tick.coordinates.iter().map(|point| point.to_position()).collect(),
        );

        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(line)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Build stall divider ticks for a row under the given map view.
///
/// Boundaries sit every stall width from the start of the row. With
/// `include_ends` the ticks run from index 0 to the last whole boundary,
/// otherwise only interior boundaries are drawn.
pub fn build_stall_tick_features<P: MapProjector + ?Sized>(
    map: &P,
    request: &StallTickRequest,
) -> Vec<StallTickFeature> {
    if !request.stall_width_ft.is_finite() || request.stall_width_ft <= 0.0 {
        return Vec::new();
    }

    let a = map.project(request.start);
    let b = map.project(request.end);
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_px = dx.hypot(dy);

    if !length_px.is_finite() || length_px < MIN_ROW_PIXELS {
        return Vec::new();
    }

    let mid_lat = (request.start.lat + request.end.lat) / 2.0;
    let px_per_ft = METERS_PER_FOOT / meters_per_pixel(mid_lat, map.zoom());
    if !px_per_ft.is_finite() || px_per_ft <= 0.0 {
        return Vec::new();
    }

    let stall_px = request.stall_width_ft * px_per_ft;
    if !stall_px.is_finite() || stall_px < MIN_STALL_PIXELS {
        return Vec::new();
    }
    let tick_ft = if request.tick_length_ft.is_finite() && request.tick_length_ft > 0.0 {
        request.tick_length_ft
    } else {
        DEFAULT_TICK_LENGTH_FT
    };
    let half_tick_px = tick_ft * px_per_ft / 2.0;

    let (ux, uy) = (dx / length_px, dy / length_px);
    let (px, py) = (-uy, ux);

    // Tolerance keeps an exact multiple from losing its last boundary
    let boundaries = (length_px / stall_px + 1e-9).floor();
    if boundaries >= MAX_TICKS as f64 {
        tracing::debug!(boundaries, "Row too dense for stall ticks");
        return Vec::new();
    }
    let boundaries = boundaries as usize;
    let indices = if request.include_ends { 0..boundaries + 1 } else { 1..boundaries };

    indices
        .map(|index| {
            let along = index as f64 * stall_px;
            let cx = a.x + ux * along;
            let cy = a.y + uy * along;
            let from = ScreenPoint::new(cx - px * half_tick_px, cy - py * half_tick_px);
            let to = ScreenPoint::new(cx + px * half_tick_px, cy + py * half_tick_px);

            StallTickFeature {
                index,
                kind: STALL_TICK_KIND.to_string(),
                coordinates: [map.unproject(from), map.unproject(to)],
                properties: request.feature_props.clone(),
            }
        })
        .collect()
}
