//! Qdrant backend: connection config, filter compilation, and the
//! [`VectorStore`](crate::store::VectorStore) implementation.

pub mod config;
pub mod filter;
pub mod store;

pub use config::QdrantConfig;
pub use filter::{compile_filters, QdrantClause, QdrantFilter};
pub use store::QdrantStore;
