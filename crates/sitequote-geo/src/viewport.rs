//! Web Mercator viewport math.
//!
//! The stall tick generator works in screen pixels so its degeneracy
//! threshold matches what the user sees. `MapProjector` is the seam a map
//! widget plugs into; `WebMercatorViewport` is the pure implementation used
//! by the server and the tests.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Equatorial circumference of the WGS 84 ellipsoid, in meters
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;

/// Edge length of a map tile at zoom 0, in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Ground resolution at a latitude and zoom level
pub fn meters_per_pixel(latitude: f64, zoom: f64) -> f64 {
    EARTH_CIRCUMFERENCE_M * latitude.to_radians().cos() / (TILE_SIZE * 2f64.powf(zoom))
}

/// WGS 84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// GeoJSON position order
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }
}

/// Screen coordinate in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Projection between geographic and screen coordinates
pub trait MapProjector {
    fn project(&self, point: LngLat) -> ScreenPoint;

    fn unproject(&self, point: ScreenPoint) -> LngLat;

    fn zoom(&self) -> f64;
}

/// A Web Mercator map view centered on a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WebMercatorViewport {
    pub center: LngLat,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl WebMercatorViewport {
    pub fn new(center: LngLat, zoom: f64, width: f64, height: f64) -> Self {
        Self { center, zoom, width, height }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Absolute world pixel coordinates
    fn to_world(&self, point: LngLat) -> (f64, f64) {
        let size = self.world_size();
        let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (point.lng + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> LngLat {
        let size = self.world_size();
        let lng = x / size * 360.0 - 180.0;
        let n = PI - 2.0 * PI * y / size;
        let lat = n.sinh().atan().to_degrees();
        LngLat::new(lng, lat)
    }
}

impl MapProjector for WebMercatorViewport {
    fn project(&self, point: LngLat) -> ScreenPoint {
        let (cx, cy) = self.to_world(self.center);
        let (x, y) = self.to_world(point);
        ScreenPoint::new(x - cx + self.width / 2.0, y - cy + self.height / 2.0)
    }

    fn unproject(&self, point: ScreenPoint) -> LngLat {
        let (cx, cy) = self.to_world(self.center);
        self.from_world(point.x + cx - self.width / 2.0, point.y + cy - self.height / 2.0)
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}
