use sitequote_core::models::{DocumentId, MeasurementDocument};
use uuid::Uuid;

use crate::dto::CreateMeasurementRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// Service for stored measurement documents
pub struct MeasurementService;

impl MeasurementService {
    /// Store a new document under a fresh id
    pub async fn create(
        state: &AppState,
        request: CreateMeasurementRequest,
    ) -> Result<MeasurementDocument, ApiError> {
        if request.job_id.trim().is_empty() {
            return Err(ApiError::bad_request("jobId is required"));
        }

        let document = MeasurementDocument::new(
            DocumentId::new(Uuid::new_v4().to_string()),
            request.job_id,
            request.name,
            request.mode,
        )
        .with_geometries(request.geometries);

        state.measurement_store.save(&document).await?;
        Ok(document)
    }

    /// Load a document or fail with 404
    pub async fn load(state: &AppState, id: &str) -> Result<MeasurementDocument, ApiError> {
        let id = DocumentId::new(id);
        state
            .measurement_store
            .get(&id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Measurement document {} not found", id)))
    }
}
