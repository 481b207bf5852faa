use thiserror::Error;

use crate::models::{DistanceMetric, RecordId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filter operation '{operation}' is not supported by the {backend} backend")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },

    #[error("Cannot mix conditions with must/should/must_not clauses")]
    FilterComposition,

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Vector not found: {0}")]
    VectorNotFound(RecordId),

    #[error(
        "Collection '{name}' already exists with dimension {existing_dimension} \
         ({existing_distance:?}); requested {requested_dimension} ({requested_distance:?})"
    )]
    CollectionMismatch {
        name: String,
        existing_dimension: u64,
        existing_distance: DistanceMetric,
        requested_dimension: u64,
        requested_distance: DistanceMetric,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Typed "not implemented" result for filter operations a backend's query
    /// language cannot express.
    pub fn unsupported(backend: &'static str, operation: &'static str) -> Self {
        StoreError::Unsupported { backend, operation }
    }
}

impl From<qdrant_client::QdrantError> for StoreError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        StoreError::Backend(err.to_string())
    }
}
