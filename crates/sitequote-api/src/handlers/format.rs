use axum::Json;
use sitequote_core::units::{format_area, format_length};

use crate::dto::{FormatRequest, FormatResponse};
use crate::error::ApiError;

pub async fn format_measurement(
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, ApiError> {
    if request.square_meters.is_none() && request.meters.is_none() {
        return Err(ApiError::bad_request("Provide squareMeters or meters"));
    }

    Ok(Json(FormatResponse {
        area: request.square_meters.map(format_area),
        length: request.meters.map(format_length),
    }))
}
