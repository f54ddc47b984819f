//! Firestore REST client
//!
//! Talks to the Firestore v1 REST API with an API key. Writes go through
//! `documents:commit` so the creation timestamp is assigned by the server
//! (REQUEST_TIME transform) and a create-only precondition keeps the
//! collection append-only. Reads go through `documents:runQuery` with an
//! ordered, limited structured query.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Recommendation, RecommendationDraft, RecommendationStore, StoreError};
use crate::config::FirestoreConfig;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const USER_AGENT: &str = concat!("folio-web/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Firestore-backed recommendation store
pub struct FirestoreStore {
    http: reqwest::Client,
    project_id: String,
    api_key: String,
    collection: String,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            http,
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            collection: config.collection.clone(),
        })
    }

    /// `projects/{p}/databases/(default)/documents`
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    /// Endpoint URL for a documents RPC (`commit`, `runQuery`, ...)
    fn rpc_url(&self, rpc: &str) -> String {
        format!(
            "{}/{}:{}?key={}",
            FIRESTORE_BASE_URL,
            self.documents_root(),
            rpc,
            self.api_key
        )
    }

    async fn post_rpc<Req: Serialize>(
        &self,
        rpc: &str,
        request: &Req,
    ) -> Result<reqwest::Response, StoreError> {
        let response = self
            .http
            .post(self.rpc_url(rpc))
            .json(request)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(status.as_u16(), body));
        }

        Ok(response)
    }
}

#[async_trait]
impl RecommendationStore for FirestoreStore {
    async fn add(&self, draft: &RecommendationDraft) -> Result<(), StoreError> {
        let document_path = format!(
            "{}/{}/{}",
            self.documents_root(),
            self.collection,
            Uuid::new_v4()
        );
        let request = commit_request(draft, document_path);

        tracing::debug!(collection = %self.collection, "Appending recommendation to Firestore");
        self.post_rpc("commit", &request).await?;
        tracing::info!(collection = %self.collection, "Recommendation stored");

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Recommendation>, StoreError> {
        let request = run_query_request(&self.collection, limit);

        tracing::debug!(collection = %self.collection, limit, "Querying recent recommendations");
        let response = self.post_rpc("runQuery", &request).await?;

        let results: Vec<QueryResult> = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        let recommendations: Vec<Recommendation> = results
            .into_iter()
            .filter_map(|r| r.document)
            .map(decode_document)
            .collect();

        tracing::debug!(count = recommendations.len(), "Recommendation query complete");
        Ok(recommendations)
    }
}

// ============================================================================
// Wire types (Firestore v1 REST)
// ============================================================================

/// A Firestore field value. Firestore encodes values as a single-key
/// object (`{"stringValue": ...}`); unused kinds stay `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp_value: Option<DateTime<Utc>>,
}

impl FieldValue {
    fn string(value: &str) -> Self {
        Self {
            string_value: Some(value.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitRequest {
    writes: Vec<Write>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Write {
    update: FirestoreDocument,
    update_transforms: Vec<FieldTransform>,
    current_document: Precondition,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldTransform {
    field_path: String,
    set_to_server_value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Precondition {
    exists: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryRequest {
    structured_query: StructuredQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredQuery {
    from: Vec<CollectionSelector>,
    order_by: Vec<Order>,
    limit: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Order {
    field: FieldReference,
    direction: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

/// One streamed `runQuery` result. An entry without a `document` is a
/// bare read-time marker, which is how Firestore reports an empty result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    document: Option<FirestoreDocument>,
}

/// Build the commit payload for an append: document fields from the
/// draft, a create-only precondition, and a server-time transform for
/// the `timestamp` field. The client never supplies the timestamp.
fn commit_request(draft: &RecommendationDraft, document_path: String) -> CommitRequest {
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), FieldValue::string(&draft.name));
    if !draft.role.is_empty() {
        fields.insert("role".to_string(), FieldValue::string(&draft.role));
    }
    if !draft.company.is_empty() {
        fields.insert("company".to_string(), FieldValue::string(&draft.company));
    }
    fields.insert("message".to_string(), FieldValue::string(&draft.message));

    CommitRequest {
        writes: vec![Write {
            update: FirestoreDocument {
                name: document_path,
                fields,
            },
            update_transforms: vec![FieldTransform {
                field_path: "timestamp".to_string(),
                set_to_server_value: "REQUEST_TIME".to_string(),
            }],
            current_document: Precondition { exists: false },
        }],
    }
}

/// Build the ordered, limited read query.
fn run_query_request(collection: &str, limit: usize) -> RunQueryRequest {
    RunQueryRequest {
        structured_query: StructuredQuery {
            from: vec![CollectionSelector {
                collection_id: collection.to_string(),
            }],
            order_by: vec![Order {
                field: FieldReference {
                    field_path: "timestamp".to_string(),
                },
                direction: "DESCENDING".to_string(),
            }],
            limit: limit as u32,
        },
    }
}

/// Map a Firestore document onto the record type. Unknown fields are
/// dropped; a missing message decodes to an empty string rather than
/// failing the whole snapshot.
fn decode_document(document: FirestoreDocument) -> Recommendation {
    let mut fields = document.fields;
    let take_string =
        |fields: &mut BTreeMap<String, FieldValue>, key: &str| -> Option<String> {
            fields.remove(key).and_then(|v| v.string_value)
        };

    let timestamp = fields.remove("timestamp").and_then(|v| v.timestamp_value);

    Recommendation {
        name: take_string(&mut fields, "name").filter(|s| !s.is_empty()),
        role: take_string(&mut fields, "role").filter(|s| !s.is_empty()),
        company: take_string(&mut fields, "company").filter(|s| !s.is_empty()),
        message: take_string(&mut fields, "message").unwrap_or_default(),
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(name: &str, role: &str, company: &str, message: &str) -> RecommendationDraft {
        RecommendationDraft {
            name: name.to_string(),
            role: role.to_string(),
            company: company.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_commit_request_shape() {
        let request = commit_request(
            &draft("Anna", "Engineer", "", "Great colleague, highly recommended."),
            "projects/p/databases/(default)/documents/recommendations/abc".to_string(),
        );
        let value = serde_json::to_value(&request).unwrap();

        let write = &value["writes"][0];
        assert_eq!(write["update"]["fields"]["name"]["stringValue"], "Anna");
        assert_eq!(write["update"]["fields"]["role"]["stringValue"], "Engineer");
        // Empty optional fields are omitted entirely
        assert!(write["update"]["fields"].get("company").is_none());
        // Timestamp comes from the server, never the payload
        assert!(write["update"]["fields"].get("timestamp").is_none());
        assert_eq!(
            write["updateTransforms"][0]["fieldPath"],
            "timestamp"
        );
        assert_eq!(
            write["updateTransforms"][0]["setToServerValue"],
            "REQUEST_TIME"
        );
        // Create-only append
        assert_eq!(write["currentDocument"]["exists"], false);
    }

    #[test]
    fn test_run_query_request_shape() {
        let request = run_query_request("recommendations", 10);
        let value = serde_json::to_value(&request).unwrap();

        let query = &value["structuredQuery"];
        assert_eq!(query["from"][0]["collectionId"], "recommendations");
        assert_eq!(query["orderBy"][0]["field"]["fieldPath"], "timestamp");
        assert_eq!(query["orderBy"][0]["direction"], "DESCENDING");
        assert_eq!(query["limit"], 10);
    }

    #[test]
    fn test_decode_snapshot_with_documents() {
        let body = json!([
            {
                "document": {
                    "name": "projects/p/databases/(default)/documents/recommendations/a",
                    "fields": {
                        "name": { "stringValue": "Jürgen" },
                        "role": { "stringValue": "CTO" },
                        "message": { "stringValue": "Delivered ahead of schedule." },
                        "timestamp": { "timestampValue": "2026-08-01T12:00:00Z" }
                    }
                },
                "readTime": "2026-08-01T12:00:01Z"
            }
        ]);
        let results: Vec<QueryResult> = serde_json::from_value(body).unwrap();
        let records: Vec<Recommendation> = results
            .into_iter()
            .filter_map(|r| r.document)
            .map(decode_document)
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Jürgen"));
        assert_eq!(records[0].role.as_deref(), Some("CTO"));
        assert_eq!(records[0].company, None);
        assert_eq!(records[0].message, "Delivered ahead of schedule.");
        assert!(records[0].timestamp.is_some());
    }

    #[test]
    fn test_decode_empty_snapshot_is_read_time_marker() {
        // An empty collection answers with a single entry carrying only readTime
        let body = json!([{ "readTime": "2026-08-01T12:00:01Z" }]);
        let results: Vec<QueryResult> = serde_json::from_value(body).unwrap();
        let records: Vec<Recommendation> = results
            .into_iter()
            .filter_map(|r| r.document)
            .map(decode_document)
            .collect();

        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_tolerates_missing_name_and_timestamp() {
        let body = json!([
            {
                "document": {
                    "name": "projects/p/databases/(default)/documents/recommendations/b",
                    "fields": {
                        "message": { "stringValue": "Submitted before validation existed." }
                    }
                }
            }
        ]);
        let results: Vec<QueryResult> = serde_json::from_value(body).unwrap();
        let record = decode_document(results.into_iter().next().unwrap().document.unwrap());

        assert_eq!(record.name, None);
        assert_eq!(record.timestamp, None);
        assert_eq!(record.message, "Submitted before validation existed.");
    }

    #[test]
    fn test_store_creation() {
        let store = FirestoreStore::new(&FirestoreConfig {
            project_id: "demo-project".to_string(),
            api_key: "test-key".to_string(),
            collection: "recommendations".to_string(),
        });
        assert!(store.is_ok());
    }

    #[test]
    fn test_rpc_url() {
        let store = FirestoreStore::new(&FirestoreConfig {
            project_id: "demo-project".to_string(),
            api_key: "k".to_string(),
            collection: "recommendations".to_string(),
        })
        .unwrap();
        assert_eq!(
            store.rpc_url("runQuery"),
            "https://firestore.googleapis.com/v1/projects/demo-project/databases/(default)/documents:runQuery?key=k"
        );
    }
}
