//! Error types for SiteQuote

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    // Template errors
    #[error("Service template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("Duplicate service template id: {id}")]
    DuplicateTemplate { id: String },

    #[error("Invalid rate for {id}: {reason}")]
    InvalidRate { id: String, reason: String },

    #[error("Unknown industry: {name}. Available: {available}")]
    UnknownIndustry { name: String, available: String },

    // Identity errors
    #[error("{entity} is missing its id")]
    MissingId { entity: String },

    // Geometry errors
    #[error("Geometry not found: {id}")]
    GeometryNotFound { id: String },

    #[error("Invalid geometry {geometry_id}: {reason}")]
    InvalidGeometry { geometry_id: String, reason: String },

    // Storage errors
    #[error("Measurement document not found: {id}")]
    DocumentNotFound { id: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Serialization(err.to_string())
    }
}
