use axum::Json;
use geojson::{Feature, FeatureCollection};
use sitequote_geo::build_stall_tick_features;

use crate::dto::{StallTicksRequest, StallTicksResponse};

pub async fn build_stall_ticks(Json(request): Json<StallTicksRequest>) -> Json<StallTicksResponse> {
    let ticks = build_stall_tick_features(&request.viewport, &request.row);
    tracing::debug!(ticks = ticks.len(), zoom = request.viewport.zoom, "Built stall ticks");

    let features: Vec<Feature> = ticks.into_iter().map(Feature::from).collect();

    Json(StallTicksResponse {
        tick_count: features.len(),
        features: FeatureCollection { bbox: None, features, foreign_members: None },
    })
}
