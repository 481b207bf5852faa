use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::vectors_config::Config as VectorsConfig;
use qdrant_client::qdrant::vectors_output::VectorsOptions;
use qdrant_client::qdrant::{
    self, CollectionStatus as QdrantCollectionStatus, CreateCollectionBuilder,
    DeletePointsBuilder, Distance, GetPointsBuilder, ListValue, PointStruct, RetrievedPoint,
    ScoredPoint, ScrollPointsBuilder, SearchPointsBuilder, Struct, UpsertPointsBuilder,
    Value as QdrantValue, VectorParamsBuilder, VectorsOutput,
};
use qdrant_client::Qdrant;
use tracing::{debug, info};

use super::config::QdrantConfig;
use super::filter::{compile_filters, point_id_from_record, record_id_from_point, QdrantFilter};
use crate::error::{StoreError, StoreResult};
use crate::filter::Filters;
use crate::models::{
    CollectionConfig, CollectionInfo, CollectionStatus, DistanceMetric, Payload, PersistenceMode,
    RecordId, SearchHit, VectorRecord,
};
use crate::store::VectorStore;

/// Qdrant-backed implementation of [`VectorStore`], bound to one collection.
///
/// The client handle is safe for concurrent use; the store itself carries no
/// other state.
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
}

impl QdrantStore {
    /// Build the client from `config` and ensure the collection exists.
    pub async fn connect(
        config: QdrantConfig,
        collection: impl Into<String>,
        collection_config: &CollectionConfig,
    ) -> StoreResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to build Qdrant client: {e}")))?;

        let store = Self {
            client,
            collection: collection.into(),
        };
        store.create_col(collection_config).await?;

        Ok(store)
    }

    /// Wrap an existing client without touching the collection.
    pub fn from_client(client: Qdrant, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn to_qdrant_distance(metric: DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    fn from_qdrant_distance(distance: Distance) -> DistanceMetric {
        match distance {
            Distance::Cosine => DistanceMetric::Cosine,
            Distance::Euclid => DistanceMetric::Euclidean,
            Distance::Dot => DistanceMetric::DotProduct,
            _ => DistanceMetric::Cosine,
        }
    }

    /// Extract vector values from VectorsOutput.
    /// Note: Uses deprecated data field for now until migration to 1.18+
    #[allow(deprecated)]
    fn extract_vector(vectors: &Option<VectorsOutput>) -> Option<Vec<f32>> {
        match vectors {
            Some(VectorsOutput {
                vectors_options: Some(options),
            }) => match options {
                VectorsOptions::Vector(v) => Some(v.data.clone()),
                VectorsOptions::Vectors(named) => {
                    named.vectors.values().next().map(|v| v.data.clone())
                }
            },
            _ => None,
        }
    }

    fn collection_info_from(name: &str, info: qdrant::CollectionInfo) -> CollectionInfo {
        let status = match info.status() {
            QdrantCollectionStatus::Green => CollectionStatus::Green,
            QdrantCollectionStatus::Yellow => CollectionStatus::Yellow,
            _ => CollectionStatus::Grey,
        };

        let params = info
            .config
            .as_ref()
            .and_then(|c| c.params.as_ref())
            .and_then(|p| p.vectors_config.as_ref())
            .and_then(|vc| vc.config.as_ref());

        let (dimension, distance, persistence) = match params {
            Some(VectorsConfig::Params(p)) => (
                p.size,
                Self::from_qdrant_distance(p.distance()),
                persistence_from(p.on_disk),
            ),
            // Multi-vector collections report their first vector config.
            Some(VectorsConfig::ParamsMap(map)) => match map.map.values().next() {
                Some(p) => (
                    p.size,
                    Self::from_qdrant_distance(p.distance()),
                    persistence_from(p.on_disk),
                ),
                None => (0, DistanceMetric::Cosine, PersistenceMode::InMemory),
            },
            None => (0, DistanceMetric::Cosine, PersistenceMode::InMemory),
        };

        CollectionInfo {
            name: name.to_string(),
            dimension,
            distance,
            persistence,
            points_count: info.points_count.unwrap_or(0),
            indexed_vectors_count: info.indexed_vectors_count.unwrap_or(0),
            status,
        }
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    type Filter = QdrantFilter;

    fn filter(&self) -> QdrantFilter {
        QdrantFilter::new()
    }

    async fn create_col(&self, config: &CollectionConfig) -> StoreResult<()> {
        let existing = self.client.list_collections().await?;
        if existing
            .collections
            .iter()
            .any(|c| c.name == self.collection)
        {
            let info = self.col_info().await?;
            ensure_matching_config(&self.collection, &info, config)?;
            debug!(collection = %self.collection, "Collection already exists, skipping creation");
            return Ok(());
        }

        let params =
            VectorParamsBuilder::new(config.dimension, Self::to_qdrant_distance(config.distance))
                .on_disk(config.persistence.is_on_disk());

        self.client
            .create_collection(CreateCollectionBuilder::new(&self.collection).vectors_config(params))
            .await?;

        info!(
            collection = %self.collection,
            dimension = config.dimension,
            distance = config.distance.as_str(),
            "Created collection"
        );
        Ok(())
    }

    async fn list_cols(&self) -> StoreResult<Vec<String>> {
        let response = self.client.list_collections().await?;
        Ok(response
            .collections
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    async fn delete_col(&self) -> StoreResult<()> {
        self.client.delete_collection(&self.collection).await?;
        info!(collection = %self.collection, "Deleted collection");
        Ok(())
    }

    async fn col_info(&self) -> StoreResult<CollectionInfo> {
        let response = self.client.collection_info(&self.collection).await?;
        let info = response
            .result
            .ok_or_else(|| StoreError::CollectionNotFound(self.collection.clone()))?;
        Ok(Self::collection_info_from(&self.collection, info))
    }

    async fn insert(
        &self,
        vectors: Vec<Vec<f32>>,
        payloads: Option<Vec<Payload>>,
        ids: Option<Vec<RecordId>>,
    ) -> StoreResult<Vec<RecordId>> {
        let count = vectors.len();
        let ids = assign_ids(count, ids)?;
        let payloads = assign_payloads(count, payloads)?;

        let points: Vec<PointStruct> = vectors
            .into_iter()
            .zip(ids.iter())
            .zip(payloads)
            .map(|((vector, id), payload)| {
                PointStruct::new(point_id_from_record(id), vector, payload_to_qdrant(payload))
            })
            .collect();

        info!(collection = %self.collection, count, "Inserting vectors");
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await?;

        Ok(ids)
    }

    async fn search(
        &self,
        query: &str,
        vector: Vec<f32>,
        limit: u64,
        filters: Option<Filters<QdrantFilter>>,
    ) -> StoreResult<Vec<SearchHit>> {
        let filter = compile_filters(filters)?;
        debug!(collection = %self.collection, query, limit, "Searching vectors");

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, limit).with_payload(true);
        if let Some(filter) = filter {
            builder = builder.filter(filter);
        }

        let response = self.client.search_points(builder).await?;
        response.result.into_iter().map(search_hit_from).collect()
    }

    async fn delete(&self, id: RecordId) -> StoreResult<()> {
        // The backend accepts absent ids in the selector, so deletion is
        // idempotent by contract.
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(vec![point_id_from_record(&id)])
                    .wait(true),
            )
            .await?;

        debug!(collection = %self.collection, record = %id, "Deleted vector");
        Ok(())
    }

    async fn update(
        &self,
        id: RecordId,
        vector: Option<Vec<f32>>,
        payload: Option<Payload>,
    ) -> StoreResult<()> {
        // The backend upsert is a full overwrite, so read and merge first to
        // keep omitted fields intact.
        let existing = self
            .get(id.clone())
            .await?
            .ok_or_else(|| StoreError::VectorNotFound(id.clone()))?;

        let merged = merge_record(existing, vector, payload);
        let point = PointStruct::new(
            point_id_from_record(&id),
            merged.embedding.unwrap_or_default(),
            payload_to_qdrant(merged.payload),
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await?;

        debug!(collection = %self.collection, record = %id, "Updated vector");
        Ok(())
    }

    async fn get(&self, id: RecordId) -> StoreResult<Option<VectorRecord>> {
        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(&self.collection, vec![point_id_from_record(&id)])
                    .with_vectors(true)
                    .with_payload(true),
            )
            .await?;

        match response.result.into_iter().next() {
            Some(point) => record_from_retrieved(point).map(Some),
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        filters: Option<Filters<QdrantFilter>>,
        limit: u64,
    ) -> StoreResult<Vec<VectorRecord>> {
        let filter = compile_filters(filters)?;

        let mut builder = ScrollPointsBuilder::new(&self.collection)
            .limit(limit as u32)
            .with_payload(true)
            .with_vectors(false);
        if let Some(filter) = filter {
            builder = builder.filter(filter);
        }

        let response = self.client.scroll(builder).await?;
        response
            .result
            .into_iter()
            .map(record_from_retrieved)
            .collect()
    }
}

fn ensure_matching_config(
    name: &str,
    existing: &CollectionInfo,
    requested: &CollectionConfig,
) -> StoreResult<()> {
    if existing.dimension != requested.dimension || existing.distance != requested.distance {
        return Err(StoreError::CollectionMismatch {
            name: name.to_string(),
            existing_dimension: existing.dimension,
            existing_distance: existing.distance,
            requested_dimension: requested.dimension,
            requested_distance: requested.distance,
        });
    }
    Ok(())
}

fn assign_ids(count: usize, ids: Option<Vec<RecordId>>) -> StoreResult<Vec<RecordId>> {
    match ids {
        Some(ids) if ids.len() != count => Err(StoreError::Validation(format!(
            "Expected {count} ids, got {}",
            ids.len()
        ))),
        Some(ids) => Ok(ids),
        None => Ok((0..count).map(|_| RecordId::generate()).collect()),
    }
}

fn assign_payloads(count: usize, payloads: Option<Vec<Payload>>) -> StoreResult<Vec<Payload>> {
    match payloads {
        Some(payloads) if payloads.len() != count => Err(StoreError::Validation(format!(
            "Expected {count} payloads, got {}",
            payloads.len()
        ))),
        Some(payloads) => Ok(payloads),
        None => Ok(vec![Payload::new(); count]),
    }
}

fn merge_record(
    existing: VectorRecord,
    vector: Option<Vec<f32>>,
    payload: Option<Payload>,
) -> VectorRecord {
    VectorRecord {
        id: existing.id,
        embedding: vector.or(existing.embedding),
        payload: payload.unwrap_or(existing.payload),
    }
}

fn persistence_from(on_disk: Option<bool>) -> PersistenceMode {
    if on_disk.unwrap_or(false) {
        PersistenceMode::OnDisk
    } else {
        PersistenceMode::InMemory
    }
}

fn search_hit_from(point: ScoredPoint) -> StoreResult<SearchHit> {
    let id = point
        .id
        .as_ref()
        .map(record_id_from_point)
        .transpose()?
        .ok_or_else(|| StoreError::Backend("Missing point id".to_string()))?;

    Ok(SearchHit {
        id,
        score: point.score,
        payload: qdrant_to_payload(point.payload),
    })
}

fn record_from_retrieved(point: RetrievedPoint) -> StoreResult<VectorRecord> {
    let id = point
        .id
        .as_ref()
        .map(record_id_from_point)
        .transpose()?
        .ok_or_else(|| StoreError::Backend("Missing point id".to_string()))?;

    Ok(VectorRecord {
        id,
        embedding: QdrantStore::extract_vector(&point.vectors),
        payload: qdrant_to_payload(point.payload),
    })
}

fn payload_to_qdrant(payload: Payload) -> HashMap<String, QdrantValue> {
    payload
        .into_iter()
        .map(|(key, value)| (key, json_to_qdrant_value(value)))
        .collect()
}

fn json_to_qdrant_value(value: serde_json::Value) -> QdrantValue {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Kind::IntegerValue(i),
            None => Kind::DoubleValue(n.as_f64().unwrap_or_default()),
        },
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(json_to_qdrant_value).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(Struct {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, json_to_qdrant_value(value)))
                .collect(),
        }),
    };

    QdrantValue { kind: Some(kind) }
}

fn qdrant_to_payload(payload: HashMap<String, QdrantValue>) -> Payload {
    payload
        .into_iter()
        .filter_map(|(key, value)| qdrant_value_to_json(value).map(|json| (key, json)))
        .collect()
}

fn qdrant_value_to_json(value: QdrantValue) -> Option<serde_json::Value> {
    match value.kind? {
        Kind::NullValue(_) => Some(serde_json::Value::Null),
        Kind::BoolValue(b) => Some(serde_json::Value::Bool(b)),
        Kind::IntegerValue(i) => Some(serde_json::Value::Number(i.into())),
        Kind::DoubleValue(f) => serde_json::Number::from_f64(f).map(serde_json::Value::Number),
        Kind::StringValue(s) => Some(serde_json::Value::String(s)),
        Kind::ListValue(list) => Some(serde_json::Value::Array(
            list.values
                .into_iter()
                .filter_map(qdrant_value_to_json)
                .collect(),
        )),
        Kind::StructValue(fields) => Some(serde_json::Value::Object(
            fields
                .fields
                .into_iter()
                .filter_map(|(key, value)| qdrant_value_to_json(value).map(|json| (key, json)))
                .collect(),
        )),
    }
}
