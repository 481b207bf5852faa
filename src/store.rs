use async_trait::async_trait;

use crate::error::StoreResult;
use crate::filter::{FilterBuilder, Filters};
use crate::models::{CollectionConfig, CollectionInfo, Payload, RecordId, SearchHit, VectorRecord};

/// Default number of hits returned by a search.
pub const DEFAULT_SEARCH_LIMIT: u64 = 5;

/// Default number of records returned by a listing.
pub const DEFAULT_LIST_LIMIT: u64 = 100;

/// Storage contract for vector records, bound to one collection.
///
/// Implementations hold only the immutable collection identity and a backend
/// client handle; every operation is a single request/response call and
/// transient backend failures propagate unmodified. Filters are accepted as
/// either the backend's typed builder or a legacy flat mapping and compiled
/// before any backend call.
#[cfg_attr(test, mockall::automock(type Filter = crate::qdrant::QdrantFilter;))]
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Filter builder for the active backend.
    type Filter: FilterBuilder + Send;

    /// Fresh, empty filter builder for this backend.
    fn filter(&self) -> Self::Filter;

    // ===== Collection Lifecycle =====

    /// Create the collection if it does not exist.
    ///
    /// Creation is idempotent, but an existing collection whose dimension or
    /// distance metric differ from the request is a hard
    /// `CollectionMismatch` error rather than a silent no-op.
    async fn create_col(&self, config: &CollectionConfig) -> StoreResult<()>;

    /// List the names of all collections on the backend.
    async fn list_cols(&self) -> StoreResult<Vec<String>>;

    /// Delete the collection.
    async fn delete_col(&self) -> StoreResult<()>;

    /// Introspect the collection.
    async fn col_info(&self) -> StoreResult<CollectionInfo>;

    // ===== Record Operations =====

    /// Insert a batch of vectors.
    ///
    /// Missing ids are assigned fresh UUIDs; missing payloads default to
    /// empty. Returns the ids actually assigned, in input order. The write
    /// waits for backend acknowledgement, so inserted records are visible to
    /// subsequent reads; there is no partial-batch rollback on failure.
    async fn insert(
        &self,
        vectors: Vec<Vec<f32>>,
        payloads: Option<Vec<Payload>>,
        ids: Option<Vec<RecordId>>,
    ) -> StoreResult<Vec<RecordId>>;

    /// Nearest-neighbor search, best match first.
    ///
    /// `query` is the human-readable descriptor of the search, used for
    /// tracing only.
    async fn search(
        &self,
        query: &str,
        vector: Vec<f32>,
        limit: u64,
        filters: Option<Filters<Self::Filter>>,
    ) -> StoreResult<Vec<SearchHit>>;

    /// Delete a record. Deleting an absent id is a no-op.
    async fn delete(&self, id: RecordId) -> StoreResult<()>;

    /// Replace only the supplied fields of a record, preserving the rest.
    ///
    /// Fails with `VectorNotFound` when the record does not exist.
    async fn update(
        &self,
        id: RecordId,
        vector: Option<Vec<f32>>,
        payload: Option<Payload>,
    ) -> StoreResult<()>;

    /// Fetch a record with its embedding and payload, or `None` when absent.
    async fn get(&self, id: RecordId) -> StoreResult<Option<VectorRecord>>;

    /// List up to `limit` records with payloads, skipping vectors.
    async fn list(
        &self,
        filters: Option<Filters<Self::Filter>>,
        limit: u64,
    ) -> StoreResult<Vec<VectorRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_reports_absent_record() {
        let mut store = MockVectorStore::new();
        store.expect_get().returning(|_| Ok(None));

        let record = store.get(RecordId::from(7)).await.unwrap();
        assert!(record.is_none());
    }
}
