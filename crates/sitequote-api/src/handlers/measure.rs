use axum::Json;
use sitequote_core::models::{Geometry, GeometryKind, UnitLabel};
use sitequote_geo::{measure_geometry, PhotoScale};

use crate::dto::{MeasureRequest, MeasureResponse};
use crate::error::ApiError;

pub async fn measure_shape(
    Json(request): Json<MeasureRequest>,
) -> Result<Json<MeasureResponse>, ApiError> {
    let scale = request.pixels_per_foot.map(PhotoScale::new).transpose()?;

    let unit_label = match request.kind {
        GeometryKind::Polygon => UnitLabel::Sqft,
        GeometryKind::Polyline => UnitLabel::Ft,
        GeometryKind::Point => UnitLabel::Ea,
    };

    // Unbound: measuring does not price, so no service is attached
    let geometry = Geometry::new(request.id, "", request.kind, 0.0).with_shape(request.shape);
    let value = measure_geometry(&geometry, scale.as_ref())?;

    Ok(Json(MeasureResponse { value, unit_label }))
}
