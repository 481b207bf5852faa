use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a vector record.
///
/// The backend accepts unsigned integers or UUIDs as point ids; anything else
/// would be rejected at write time, so the id space is closed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(u64),
    Uuid(Uuid),
}

impl RecordId {
    /// Fresh random id, assigned when the caller does not supply one.
    pub fn generate() -> Self {
        RecordId::Uuid(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{n}"),
            RecordId::Uuid(id) => write!(f, "{id}"),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Num(n)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        RecordId::Uuid(id)
    }
}

/// Metadata attached to a vector record. Free-form JSON object, no fixed schema.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
}

impl DistanceMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DotProduct => "dot-product",
        }
    }
}

/// Whether collection data lives in memory or on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PersistenceMode {
    #[default]
    InMemory,
    OnDisk,
}

impl PersistenceMode {
    pub fn is_on_disk(&self) -> bool {
        matches!(self, PersistenceMode::OnDisk)
    }
}

/// Vector collection configuration, fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub dimension: u64,
    pub distance: DistanceMetric,
    pub persistence: PersistenceMode,
}

impl CollectionConfig {
    pub fn new(dimension: u64) -> Self {
        Self {
            dimension,
            distance: DistanceMetric::default(),
            persistence: PersistenceMode::default(),
        }
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_persistence(mut self, persistence: PersistenceMode) -> Self {
        self.persistence = persistence;
        self
    }
}

/// A stored vector record.
///
/// `embedding` is present on `get` and omitted on `list`, which skips vectors
/// for bandwidth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: RecordId,
    pub embedding: Option<Vec<f32>>,
    pub payload: Payload,
}

/// One nearest-neighbor search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: RecordId,
    pub score: f32,
    pub payload: Payload,
}

/// Collection introspection result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub dimension: u64,
    pub distance: DistanceMetric,
    pub persistence: PersistenceMode,
    pub points_count: u64,
    pub indexed_vectors_count: u64,
    pub status: CollectionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionStatus {
    Green,
    Yellow,
    Grey,
}

impl CollectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionStatus::Green => "green",
            CollectionStatus::Yellow => "yellow",
            CollectionStatus::Grey => "grey",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::from(42).to_string(), "42");

        let id = Uuid::new_v4();
        assert_eq!(RecordId::from(id).to_string(), id.to_string());
    }

    #[test]
    fn test_record_id_serde_untagged() {
        let num: RecordId = serde_json::from_str("7").unwrap();
        assert_eq!(num, RecordId::Num(7));

        let id = Uuid::new_v4();
        let json = format!("\"{id}\"");
        let parsed: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, RecordId::Uuid(id));
    }

    #[test]
    fn test_collection_config_builders() {
        let config = CollectionConfig::new(128)
            .with_distance(DistanceMetric::Euclidean)
            .with_persistence(PersistenceMode::OnDisk);

        assert_eq!(config.dimension, 128);
        assert_eq!(config.distance, DistanceMetric::Euclidean);
        assert!(config.persistence.is_on_disk());
    }

    #[test]
    fn test_collection_config_defaults() {
        let config = CollectionConfig::new(1536);
        assert_eq!(config.distance, DistanceMetric::Cosine);
        assert_eq!(config.persistence, PersistenceMode::InMemory);
    }
}
