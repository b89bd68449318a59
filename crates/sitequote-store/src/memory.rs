//! In-memory measurement store for development and testing.
//!
//! Uses `RwLock::unwrap()` intentionally. Lock poisoning only occurs when
//! another thread panicked while holding the lock, which is an unrecoverable
//! state.

use async_trait::async_trait;
use chrono::Utc;
use sitequote_core::error::{QuoteError, Result};
use sitequote_core::models::{DocumentId, MeasurementDocument};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::MeasurementStore;

/// In-memory implementation of MeasurementStore
#[derive(Debug, Clone, Default)]
pub struct MemoryMeasurementStore {
    documents: Arc<RwLock<HashMap<DocumentId, MeasurementDocument>>>,
}

impl MemoryMeasurementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MeasurementStore for MemoryMeasurementStore {
    async fn save(&self, document: &MeasurementDocument) -> Result<DocumentId> {
        if document.id.as_str().trim().is_empty() {
            return Err(QuoteError::MissingId { entity: "Measurement document".to_string() });
        }
        for geometry in &document.geometries {
            geometry.validate()?;
        }

        let mut documents = self.documents.write().unwrap();
        let mut stored = document.clone();

        if let Some(existing) = documents.get(&document.id) {
            stored.created_at = existing.created_at;
            stored.updated_at = Utc::now();
        }

        tracing::debug!(
            document_id = %stored.id,
            job_id = %stored.job_id,
            geometries = stored.geometries.len(),
            "Saved measurement document"
        );

        let id = stored.id.clone();
        documents.insert(id.clone(), stored);
        Ok(id)
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<MeasurementDocument>> {
        let documents = self.documents.read().unwrap();
        Ok(documents.get(id).cloned())
    }

    async fn list_for_job(&self, job_id: &str) -> Result<Vec<MeasurementDocument>> {
        let documents = self.documents.read().unwrap();
        let mut matching: Vec<MeasurementDocument> =
            documents.values().filter(|document| document.job_id == job_id).cloned().collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.0.cmp(&b.id.0)));
        Ok(matching)
    }

    async fn delete(&self, id: &DocumentId) -> Result<()> {
        let mut documents = self.documents.write().unwrap();
        match documents.remove(id) {
            Some(_) => Ok(()),
            None => Err(QuoteError::DocumentNotFound { id: id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sitequote_core::models::{Geometry, GeometryKind, QuoteMode};

    fn document(id: &str, job: &str) -> MeasurementDocument {
        MeasurementDocument::new(DocumentId::new(id), job, "Lot", QuoteMode::Map).with_geometries(
            vec![Geometry::new("g1", "sealcoating", GeometryKind::Polygon, 1200.0)],
        )
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let store = MemoryMeasurementStore::new();
        let id = store.save(&document("doc-1", "job-1")).await.unwrap();

        let loaded = store.get(&id).await.unwrap().unwrap();
        assert_eq!(loaded.job_id, "job-1");
        assert_eq!(loaded.geometries.len(), 1);
        assert!(store.get(&DocumentId::new("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resave_keeps_created_at() {
        let store = MemoryMeasurementStore::new();
        let original = document("doc-1", "job-1");
        store.save(&original).await.unwrap();

        let mut edited = original.clone();
        edited.created_at = original.created_at + Duration::days(3);
        edited.name = "Back lot".to_string();
        store.save(&edited).await.unwrap();

        let loaded = store.get(&original.id).await.unwrap().unwrap();
        assert_eq!(loaded.created_at, original.created_at);
        assert_eq!(loaded.name, "Back lot");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_for_job() {
        let store = MemoryMeasurementStore::new();
        let mut first = document("doc-a", "job-1");
        first.created_at = first.created_at - Duration::hours(1);
        store.save(&document("doc-b", "job-1")).await.unwrap();
        store.save(&first).await.unwrap();
        store.save(&document("doc-c", "job-2")).await.unwrap();

        let listed = store.list_for_job("job-1").await.unwrap();
        let ids: Vec<_> = listed.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["doc-a", "doc-b"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryMeasurementStore::new();
        let id = store.save(&document("doc-1", "job-1")).await.unwrap();

        store.delete(&id).await.unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.delete(&id).await, Err(QuoteError::DocumentNotFound { .. })));
    }

    #[tokio::test]
    async fn test_invalid_geometry_rejected() {
        let store = MemoryMeasurementStore::new();
        let bad = document("doc-1", "job-1")
            .with_geometries(vec![Geometry::new("", "sealcoating", GeometryKind::Polygon, 1.0)]);
        assert!(store.save(&bad).await.is_err());
    }
}
