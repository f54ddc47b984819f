//! In-process recommendation store
//!
//! Backs local development runs and the integration tests. Mirrors the
//! remote store's contract: timestamps are assigned here at append time
//! (the caller never supplies one) and reads come back newest first,
//! capped to the requested limit.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{optional, Recommendation, RecommendationDraft, RecommendationStore, StoreError};

/// Append-only store held in process memory
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Recommendation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (test observability)
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn add(&self, draft: &RecommendationDraft) -> Result<(), StoreError> {
        let record = Recommendation {
            name: optional(&draft.name),
            role: optional(&draft.role),
            company: optional(&draft.company),
            message: draft.message.clone(),
            timestamp: Some(Utc::now()),
        };
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Recommendation>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}
