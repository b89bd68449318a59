use async_trait::async_trait;
use sitequote_core::error::Result;
use sitequote_core::models::{DocumentId, MeasurementDocument};

/// Port for saved measurement documents
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Insert or replace a document, keeping its original creation time
    async fn save(&self, document: &MeasurementDocument) -> Result<DocumentId>;

    /// Retrieve a document by ID
    async fn get(&self, id: &DocumentId) -> Result<Option<MeasurementDocument>>;

    /// All documents of a job, oldest first
    async fn list_for_job(&self, job_id: &str) -> Result<Vec<MeasurementDocument>>;

    /// Delete a document
    async fn delete(&self, id: &DocumentId) -> Result<()>;
}
