use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sitequote_core::models::{DocumentId, MeasurementDocument, QuoteSummary};

use crate::dto::{CreateMeasurementRequest, DeleteResponse, QuoteQuery};
use crate::error::ApiError;
use crate::services::{MeasurementService, QuoteService};
use crate::state::AppState;

pub async fn create_measurement(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<MeasurementDocument>), ApiError> {
    tracing::info!(
        job_id = %request.job_id,
        name = %request.name,
        geometries = request.geometries.len(),
        "Creating measurement document"
    );

    let document = MeasurementService::create(&state, request).await?;

    Ok((StatusCode::CREATED, Json(document)))
}

pub async fn get_measurement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MeasurementDocument>, ApiError> {
    let document = MeasurementService::load(&state, &id).await?;
    Ok(Json(document))
}

pub async fn delete_measurement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!(document_id = %id, "Deleting measurement document");

    state.measurement_store.delete(&DocumentId::new(id.as_str())).await?;

    Ok(Json(DeleteResponse::success("measurement document", &id)))
}

pub async fn list_job_measurements(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<MeasurementDocument>>, ApiError> {
    let documents = state.measurement_store.list_for_job(&job_id).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list measurement documents");
        ApiError::internal("Failed to list measurement documents").with_details(e.to_string())
    })?;

    Ok(Json(documents))
}

pub async fn quote_measurement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteSummary>, ApiError> {
    let document = MeasurementService::load(&state, &id).await?;
    let summary = QuoteService::replay(&state, &document, query.industry.as_deref())?;

    tracing::info!(document_id = %id, total = summary.total, "Replayed measurement quote");
    Ok(Json(summary))
}
