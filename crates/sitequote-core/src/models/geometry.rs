//! User-drawn shapes bound to a service.
//!
//! A geometry carries its measurement already converted into the unit the
//! engine prices in (sqft for polygons, linear ft for polylines, a count for
//! points). The raw shape is kept for rendering and re-measurement only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{QuoteError, Result};

/// Kind of shape produced by the drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeometryKind {
    #[serde(alias = "polygon")]
    Polygon,
    #[serde(alias = "polyline", alias = "LINESTRING", alias = "linestring")]
    Polyline,
    #[serde(alias = "point")]
    Point,
}

/// Drawing surface a session measures on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    #[default]
    Map,
    Photo,
}

/// Raw shape payload, populated from whichever surface drew it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ShapePayload {
    /// GeoJSON geometry in WGS 84 longitude/latitude
    Map { geometry: geojson::Geometry },
    /// Pixel coordinates on an annotated photo
    Photo {
        points: Vec<[f64; 2]>,
        #[serde(default)]
        closed: bool,
    },
}

impl ShapePayload {
    /// The drawing surface this payload belongs to
    pub fn mode(&self) -> QuoteMode {
        match self {
            ShapePayload::Map { .. } => QuoteMode::Map,
            ShapePayload::Photo { .. } => QuoteMode::Photo,
        }
    }
}

/// A user-drawn shape bound to exactly one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub id: String,
    pub service_id: String,
    pub kind: GeometryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapePayload>,
    #[serde(deserialize_with = "non_negative")]
    pub measurement_value: f64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Negative measurements from the wire are clamped to zero
fn non_negative<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(f64::deserialize(deserializer)?.max(0.0))
}

impl Geometry {
    /// Create a geometry without a raw shape
    pub fn new(
        id: impl Into<String>,
        service_id: impl Into<String>,
        kind: GeometryKind,
        measurement_value: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            service_id: service_id.into(),
            kind,
            shape: None,
            measurement_value: measurement_value.max(0.0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the raw shape payload
    pub fn with_shape(mut self, shape: ShapePayload) -> Self {
        self.shape = Some(shape);
        self
    }

    /// The drawing surface this geometry came from, if it carries a shape
    pub fn mode(&self) -> Option<QuoteMode> {
        self.shape.as_ref().map(ShapePayload::mode)
    }

    /// Check the identity fields a drawing tool must always provide
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(QuoteError::MissingId { entity: "Geometry".to_string() });
        }
        if self.service_id.trim().is_empty() {
            return Err(QuoteError::MissingId { entity: format!("Service of geometry {}", self.id) });
        }
        if !self.measurement_value.is_finite() {
            return Err(QuoteError::InvalidGeometry {
                geometry_id: self.id.clone(),
                reason: "measurement value must be finite".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_measurement_is_clamped() {
        let geometry = Geometry::new("g1", "paint", GeometryKind::Polygon, -4.0);
        assert_eq!(geometry.measurement_value, 0.0);
    }

    #[test]
    fn test_shape_payload_tags() {
        let photo = ShapePayload::Photo { points: vec![[0.0, 0.0], [10.0, 0.0]], closed: false };
        let json = serde_json::to_value(&photo).unwrap();
        assert_eq!(json["source"], "photo");
        assert_eq!(photo.mode(), QuoteMode::Photo);

        let map: ShapePayload = serde_json::from_value(serde_json::json!({
            "source": "map",
            "geometry": { "type": "LineString", "coordinates": [[-97.0, 30.0], [-97.001, 30.0]] }
        }))
        .unwrap();
        assert_eq!(map.mode(), QuoteMode::Map);
    }

    #[test]
    fn test_geometry_accepts_drawing_tool_kinds() {
        let geometry: Geometry = serde_json::from_value(serde_json::json!({
            "id": "g1",
            "serviceId": "crack",
            "kind": "polyline",
            "measurementValue": 42.5
        }))
        .unwrap();

        assert_eq!(geometry.kind, GeometryKind::Polyline);
        assert!(geometry.shape.is_none());
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn test_deserialized_negative_measurement_is_clamped() {
        let geometry: Geometry = serde_json::from_value(serde_json::json!({
            "id": "g1",
            "serviceId": "paint",
            "kind": "POLYGON",
            "measurementValue": -5000.0
        }))
        .unwrap();

        assert_eq!(geometry.measurement_value, 0.0);
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_ids() {
        let geometry = Geometry::new("", "paint", GeometryKind::Polygon, 1.0);
        assert!(matches!(geometry.validate(), Err(QuoteError::MissingId { .. })));

        let orphan = Geometry::new("g1", "", GeometryKind::Polygon, 1.0);
        assert!(orphan.validate().is_err());
    }
}
