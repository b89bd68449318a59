//! SiteQuote Geo - Measurement, projection, and layout geometry
//!
//! This crate turns drawn shapes into priced quantities and derives the
//! screen-space striping overlays drawn along parking rows.

pub mod measure;
pub mod stall_ticks;
pub mod striping;
pub mod viewport;

pub use measure::{measure_geometry, PhotoScale};
pub use stall_ticks::{build_stall_tick_features, StallTickFeature, StallTickRequest};
pub use striping::{striping_layout, StripingLayout};
pub use viewport::{meters_per_pixel, LngLat, MapProjector, ScreenPoint, WebMercatorViewport};
