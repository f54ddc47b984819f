//! Recommendation storage
//!
//! Persistence is delegated to a remote document database; this module
//! owns the access trait and the record types. Handlers and the
//! submission workflow only ever see `dyn RecommendationStore`, so tests
//! substitute an in-process store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Maximum number of records returned by the read path
pub const RECENT_LIMIT: usize = 10;

/// Store access errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure reaching the store
    #[error("Network error: {0}")]
    Network(String),

    /// The store rejected the request (HTTP status + response body)
    #[error("Store rejected request ({0}): {1}")]
    Rejected(u16, String),

    /// The store answered with something we could not decode
    #[error("Malformed store response: {0}")]
    Malformed(String),
}

/// Inbound form payload, untrusted and untrimmed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecommendationDraft {
    pub name: String,
    pub role: String,
    pub company: String,
    pub message: String,
}

impl RecommendationDraft {
    /// Copy of the draft with surrounding whitespace stripped from every field
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            company: self.company.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// A stored recommendation as read back from the document store.
///
/// `name` is required at write time but reads tolerate legacy records
/// without one (the page falls back to "Anonymous"). `timestamp` is
/// assigned by the store; a snapshot taken before the server resolves it
/// may not carry one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Append-only access to the recommendation collection.
///
/// `add` must not assign a timestamp on the client side; creation time is
/// the store's to decide. `recent` returns at most `limit` records in
/// descending timestamp order.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn add(&self, draft: &RecommendationDraft) -> Result<(), StoreError>;

    async fn recent(&self, limit: usize) -> Result<Vec<Recommendation>, StoreError>;
}

/// Map an optional form field: empty string means absent.
fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
