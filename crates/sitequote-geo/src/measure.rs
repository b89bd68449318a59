//! Boundary measurement: drawn shapes to priced quantities.
//!
//! Map shapes are WGS 84 GeoJSON and are measured geodesically. Photo
//! shapes are pixel polylines measured in the plane and scaled by a
//! calibration. Either way the result is already in the unit the engine
//! prices in: square feet, linear feet, or a count.

use geo::{Area, Coord, Distance, Euclidean, GeodesicArea, Haversine, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};
use sitequote_core::error::{QuoteError, Result};
use sitequote_core::models::{Geometry, GeometryKind, ShapePayload};
use sitequote_core::units::{meters_to_feet, square_meters_to_square_feet};

/// Photo calibration: how many image pixels make one real-world foot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoScale {
    pub pixels_per_foot: f64,
}

impl PhotoScale {
    pub fn new(pixels_per_foot: f64) -> Result<Self> {
        if !pixels_per_foot.is_finite() || pixels_per_foot <= 0.0 {
            return Err(QuoteError::ConfigInvalid {
                key: "pixels_per_foot".to_string(),
                reason: format!("must be a positive number, got {}", pixels_per_foot),
            });
        }
        Ok(Self { pixels_per_foot })
    }

    /// Calibrate from a reference segment of known length
    pub fn from_reference(a: [f64; 2], b: [f64; 2], known_feet: f64) -> Result<Self> {
        if !known_feet.is_finite() || known_feet <= 0.0 {
            return Err(QuoteError::ConfigInvalid {
                key: "known_feet".to_string(),
                reason: format!("reference length must be positive, got {}", known_feet),
            });
        }
        let pixels = Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]));
        Self::new(pixels / known_feet)
    }
}

/// Measure a geometry's shape in the unit its kind is priced in.
///
/// Photo shapes need a scale; map shapes ignore it.
pub fn measure_geometry(geometry: &Geometry, scale: Option<&PhotoScale>) -> Result<f64> {
    let invalid = |reason: String| QuoteError::InvalidGeometry {
        geometry_id: geometry.id.clone(),
        reason,
    };

    let Some(shape) = &geometry.shape else {
        return Err(invalid("geometry has no shape to measure".to_string()));
    };

    let value = match (geometry.kind, shape) {
        (GeometryKind::Point, ShapePayload::Map { geometry: geojson }) => {
            match &geojson.value {
                geojson::Value::MultiPoint(points) => points.len() as f64,
                _ => 1.0,
            }
        }
        (GeometryKind::Point, ShapePayload::Photo { .. }) => 1.0,
        (GeometryKind::Polygon, ShapePayload::Map { geometry: geojson }) => {
            map_area_sqft(&geojson.value).map_err(invalid)?
        }
        (GeometryKind::Polyline, ShapePayload::Map { geometry: geojson }) => {
            map_length_ft(&geojson.value).map_err(invalid)?
        }
        (GeometryKind::Polygon, ShapePayload::Photo { points, .. }) => {
            let scale = scale.ok_or_else(|| invalid("photo shape needs a scale".to_string()))?;
            photo_area_sqft(points, scale).map_err(invalid)?
        }
        (GeometryKind::Polyline, ShapePayload::Photo { points, closed }) => {
            let scale = scale.ok_or_else(|| invalid("photo shape needs a scale".to_string()))?;
            photo_length_ft(points, *closed, scale).map_err(invalid)?
        }
    };

    tracing::debug!(
        geometry_id = %geometry.id,
        kind = ?geometry.kind,
        value,
        "Measured geometry"
    );
    Ok(value)
}

/// Geodesic area of a GeoJSON polygon or multipolygon, in square feet
pub fn map_area_sqft(value: &geojson::Value) -> std::result::Result<f64, String> {
    let polygons = match value {
        geojson::Value::Polygon(rings) => vec![polygon_from_rings(rings)?],
        geojson::Value::MultiPolygon(polygons) => {
            polygons.iter().map(|rings| polygon_from_rings(rings)).collect::<std::result::Result<_, _>>()?
        }
        other => return Err(format!("expected a polygon, found {}", value_kind(other))),
    };

    let square_meters: f64 = polygons.iter().map(|p| p.geodesic_area_unsigned()).sum();
    Ok(square_meters_to_square_feet(square_meters))
}

/// Haversine length of a GeoJSON line or multiline, in feet
pub fn map_length_ft(value: &geojson::Value) -> std::result::Result<f64, String> {
    let lines = match value {
        geojson::Value::LineString(positions) => vec![line_from_positions(positions)?],
        geojson::Value::MultiLineString(lines) => {
            lines.iter().map(|l| line_from_positions(l)).collect::<std::result::Result<_, _>>()?
        }
        other => return Err(format!("expected a line, found {}", value_kind(other))),
    };

    let meters: f64 = lines.iter().map(haversine_length).sum();
    Ok(meters_to_feet(meters))
}

/// Planar area of a pixel polygon, in square feet
pub fn photo_area_sqft(points: &[[f64; 2]], scale: &PhotoScale) -> std::result::Result<f64, String> {
    if points.len() < 3 {
        return Err(format!("photo polygon needs at least 3 points, found {}", points.len()));
    }
    let ring: LineString = points.iter().map(|p| Coord { x: p[0], y: p[1] }).collect();
    let square_pixels = Polygon::new(ring, vec![]).unsigned_area();
    Ok(square_pixels / (scale.pixels_per_foot * scale.pixels_per_foot))
}

/// Planar length of a pixel polyline, in feet
pub fn photo_length_ft(
    points: &[[f64; 2]],
    closed: bool,
    scale: &PhotoScale,
) -> std::result::Result<f64, String> {
    if points.len() < 2 {
        return Err(format!("photo line needs at least 2 points, found {}", points.len()));
    }

    let mut pixels: f64 = points
        .windows(2)
        .map(|pair| Euclidean.distance(Point::new(pair[0][0], pair[0][1]), Point::new(pair[1][0], pair[1][1])))
        .sum();

    if closed && points.len() > 2 {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            pixels += Euclidean.distance(Point::new(last[0], last[1]), Point::new(first[0], first[1]));
        }
    }

    Ok(pixels / scale.pixels_per_foot)
}

fn value_kind(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn haversine_length(line: &LineString) -> f64 {
    line.points()
        .zip(line.points().skip(1))
        .map(|(a, b)| Haversine.distance(a, b))
        .sum()
}

fn line_from_positions(positions: &[Vec<f64>]) -> std::result::Result<LineString, String> {
    if positions.len() < 2 {
        return Err(format!("line needs at least 2 positions, found {}", positions.len()));
    }
    positions.iter().map(|p| coord_from_position(p)).collect::<std::result::Result<Vec<_>, _>>().map(LineString::from)
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> std::result::Result<Polygon, String> {
    let mut rings = rings.iter().map(|ring| {
        ring.iter().map(|p| coord_from_position(p)).collect::<std::result::Result<Vec<_>, _>>().map(LineString::from)
    });

    let exterior = rings.next().ok_or_else(|| "polygon has no exterior ring".to_string())??;
    if exterior.0.len() < 3 {
        return Err(format!("polygon exterior needs at least 3 positions, found {}", exterior.0.len()));
    }
    let interiors = rings.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn coord_from_position(position: &[f64]) -> std::result::Result<Coord, String> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
        _ => Err(format!("invalid position {:?}", position)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitequote_core::models::GeometryKind;

    fn map_geometry(kind: GeometryKind, value: geojson::Value) -> Geometry {
        Geometry::new("g1", "svc", kind, 0.0)
            .with_shape(ShapePayload::Map { geometry: geojson::Geometry::new(value) })
    }

    #[test]
    fn test_map_polygon_area() {
        // Roughly 0.001° x 0.001° square at the equator: ~111.3 m per side
        let polygon = map_geometry(
            GeometryKind::Polygon,
            geojson::Value::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![0.001, 0.0],
                vec![0.001, 0.001],
                vec![0.0, 0.001],
                vec![0.0, 0.0],
            ]]),
        );

        let sqft = measure_geometry(&polygon, None).unwrap();
        let expected = square_meters_to_square_feet(111.32 * 110.57);
        assert!((sqft - expected).abs() / expected < 0.01, "got {}", sqft);
    }

    #[test]
    fn test_map_line_length() {
        let line = map_geometry(
            GeometryKind::Polyline,
            geojson::Value::LineString(vec![vec![0.0, 0.0], vec![0.001, 0.0], vec![0.002, 0.0]]),
        );

        let feet = measure_geometry(&line, None).unwrap();
        let expected = meters_to_feet(222.39);
        assert!((feet - expected).abs() / expected < 0.01, "got {}", feet);
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let line_as_polygon = map_geometry(
            GeometryKind::Polygon,
            geojson::Value::LineString(vec![vec![0.0, 0.0], vec![0.001, 0.0]]),
        );
        let err = measure_geometry(&line_as_polygon, None).unwrap_err();
        assert!(err.to_string().contains("expected a polygon"));
    }

    #[test]
    fn test_points_count() {
        let single = map_geometry(GeometryKind::Point, geojson::Value::Point(vec![1.0, 2.0]));
        assert_eq!(measure_geometry(&single, None).unwrap(), 1.0);

        let many = map_geometry(
            GeometryKind::Point,
            geojson::Value::MultiPoint(vec![vec![1.0, 2.0], vec![1.1, 2.1], vec![1.2, 2.2]]),
        );
        assert_eq!(measure_geometry(&many, None).unwrap(), 3.0);
    }

    #[test]
    fn test_photo_measurements() {
        let scale = PhotoScale::from_reference([0.0, 0.0], [200.0, 0.0], 10.0).unwrap();
        assert_eq!(scale.pixels_per_foot, 20.0);

        let square = Geometry::new("p1", "svc", GeometryKind::Polygon, 0.0).with_shape(
            ShapePayload::Photo {
                points: vec![[0.0, 0.0], [200.0, 0.0], [200.0, 200.0], [0.0, 200.0]],
                closed: true,
            },
        );
        assert!((measure_geometry(&square, Some(&scale)).unwrap() - 100.0).abs() < 1e-9);

        let outline = Geometry::new("p2", "svc", GeometryKind::Polyline, 0.0).with_shape(
            ShapePayload::Photo {
                points: vec![[0.0, 0.0], [200.0, 0.0], [200.0, 200.0], [0.0, 200.0]],
                closed: true,
            },
        );
        assert!((measure_geometry(&outline, Some(&scale)).unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_photo_without_scale_is_rejected() {
        let line = Geometry::new("p1", "svc", GeometryKind::Polyline, 0.0)
            .with_shape(ShapePayload::Photo { points: vec![[0.0, 0.0], [5.0, 5.0]], closed: false });
        assert!(measure_geometry(&line, None).is_err());
    }

    #[test]
    fn test_invalid_scale() {
        assert!(PhotoScale::new(0.0).is_err());
        assert!(PhotoScale::from_reference([0.0, 0.0], [0.0, 0.0], 10.0).is_err());
        assert!(PhotoScale::from_reference([0.0, 0.0], [5.0, 0.0], -1.0).is_err());
    }
}
