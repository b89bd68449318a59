use std::sync::Arc;

use axum::{extract::State, Json};
use sitequote_core::models::QuoteSummary;

use crate::dto::ComputeQuoteRequest;
use crate::error::ApiError;
use crate::services::QuoteService;
use crate::state::AppState;

pub async fn compute_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ComputeQuoteRequest>,
) -> Result<Json<QuoteSummary>, ApiError> {
    tracing::info!(
        industry = ?request.industry,
        inline_templates = request.templates.is_some(),
        geometries = request.geometries.len(),
        "Computing quote"
    );

    let summary = QuoteService::compute(&state, request)?;

    Ok(Json(summary))
}
