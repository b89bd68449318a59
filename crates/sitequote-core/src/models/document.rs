use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::{Geometry, QuoteMode};

/// Persisted measurement document identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Saved set of geometries for a job, in drawing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementDocument {
    pub id: DocumentId,
    pub job_id: String,
    pub name: String,
    #[serde(default)]
    pub mode: QuoteMode,
    #[serde(default)]
    pub geometries: Vec<Geometry>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl MeasurementDocument {
    /// Create an empty document
    pub fn new(
        id: DocumentId,
        job_id: impl Into<String>,
        name: impl Into<String>,
        mode: QuoteMode,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            job_id: job_id.into(),
            name: name.into(),
            mode,
            geometries: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the geometries
    pub fn with_geometries(mut self, geometries: Vec<Geometry>) -> Self {
        self.geometries = geometries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::GeometryKind;

    #[test]
    fn test_document_wire_format() {
        let json = serde_json::json!({
            "id": "doc-1",
            "jobId": "job-7",
            "name": "Front lot",
            "mode": "map",
            "geometries": [
                { "id": "g1", "serviceId": "seal", "kind": "POLYGON", "measurementValue": 1200.0 }
            ],
            "createdAt": "2026-03-01T12:00:00Z",
            "updatedAt": "2026-03-01T12:30:00Z"
        });

        let document: MeasurementDocument = serde_json::from_value(json).unwrap();
        assert_eq!(document.id.as_str(), "doc-1");
        assert_eq!(document.job_id, "job-7");
        assert_eq!(document.mode, QuoteMode::Map);
        assert_eq!(document.geometries.len(), 1);
        assert_eq!(document.geometries[0].kind, GeometryKind::Polygon);
    }
}
