//! Vector Storage Layer
//!
//! This crate provides the storage layer of an AI-agent memory manager:
//! vector-record CRUD, nearest-neighbor search, and a typed filter abstraction
//! compiled into backend-native queries, independent of which vector-search
//! engine is deployed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   VectorStore    │  ← Collection lifecycle + record CRUD/search/list
//! │     (trait)      │
//! └────────┬─────────┘
//!          │ compiles filters via
//! ┌────────▼─────────┐
//! │  FilterBuilder   │  ← Per-backend condition + boolean composition surface
//! │     (trait)      │
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │   QdrantStore    │  ← Qdrant implementation
//! │   QdrantFilter   │
//! └──────────────────┘
//! ```
//!
//! Filters are accepted as either the typed builder or a legacy flat mapping;
//! both compile to structurally identical backend filters before any backend
//! call. The audit ledger and LLM routines ([`history`], [`llm`]) are
//! collaborator interfaces implemented by the host application.
//!
//! # Usage
//!
//! ```rust,no_run
//! use memstore::{
//!     CollectionConfig, FilterBuilder, Filters, QdrantConfig, QdrantStore, VectorStore,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QdrantConfig::from_env()?;
//! let store = QdrantStore::connect(config, "memories", &CollectionConfig::new(1536)).await?;
//!
//! // Insert a record with an explicit payload.
//! let mut payload = memstore::Payload::new();
//! payload.insert("user_id".to_string(), serde_json::json!("alice"));
//! let ids = store.insert(vec![vec![0.1; 1536]], Some(vec![payload]), None).await?;
//!
//! // Search with a typed filter.
//! let filter = store.filter().matches("user_id", "alice")?;
//! let hits = store
//!     .search("recent notes", vec![0.1; 1536], 5, Some(Filters::Builder(filter)))
//!     .await?;
//! # let _ = (ids, hits);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod history;
pub mod llm;
pub mod models;
pub mod qdrant;
pub mod store;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use filter::{CountBounds, FilterBuilder, Filters, GeoPoint, MatchList, MatchTerm, RangeBounds};
pub use history::{HistoryEntry, HistoryLedger, MemoryEvent};
pub use llm::{
    FeedbackClassifier, FeedbackVerdict, PromptRefiner, RefinementStrategy,
    DEFAULT_REFINEMENT_STEPS,
};
pub use models::{
    CollectionConfig, CollectionInfo, CollectionStatus, DistanceMetric, Payload, PersistenceMode,
    RecordId, SearchHit, VectorRecord,
};
pub use qdrant::{QdrantClause, QdrantConfig, QdrantFilter, QdrantStore};
pub use store::{VectorStore, DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT};
