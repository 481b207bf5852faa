//! Audit ledger interface.
//!
//! The memory manager records every change to a memory record in an
//! append-only ledger owned by the host application; this crate only defines
//! the contract and the entry shape.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::RecordId;

/// Kind of change recorded against a memory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemoryEvent {
    Add,
    Update,
    Delete,
}

impl MemoryEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryEvent::Add => "ADD",
            MemoryEvent::Update => "UPDATE",
            MemoryEvent::Delete => "DELETE",
        }
    }
}

/// One entry in a record's change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub record_id: RecordId,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub event: MemoryEvent,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    pub fn new(
        record_id: RecordId,
        event: MemoryEvent,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            record_id,
            old_value,
            new_value,
            event,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Append-only change ledger keyed by record id.
#[async_trait]
pub trait HistoryLedger: Send + Sync {
    /// Append a change entry to the ledger.
    async fn append(&self, entry: HistoryEntry) -> StoreResult<()>;

    /// Ordered change history for a record, oldest first.
    async fn history(&self, record_id: &RecordId) -> StoreResult<Vec<HistoryEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_stamped() {
        let entry = HistoryEntry::new(
            RecordId::from(1),
            MemoryEvent::Add,
            None,
            Some("remembered".to_string()),
        );

        assert_eq!(entry.event, MemoryEvent::Add);
        assert!(entry.old_value.is_none());
        assert!(entry.updated_at.is_none());
    }

    #[test]
    fn test_event_serialization() {
        assert_eq!(
            serde_json::to_string(&MemoryEvent::Update).unwrap(),
            "\"UPDATE\""
        );
        assert_eq!(MemoryEvent::Delete.as_str(), "DELETE");
    }
}
