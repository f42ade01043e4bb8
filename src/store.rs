//! Document Store
//!
//! Holds one record per successfully processed upload for the lifetime of
//! the process. The HTTP layer only sees the [`DocumentStore`] trait so a
//! persistent backend can replace [`InMemoryDocumentStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::{AppError, AppResult};

/// Stored result of processing one uploaded file. Immutable once inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub file_name: String,
    pub file_path: PathBuf,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        file_path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            file_path: file_path.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            document_id: self.id.clone(),
            file_name: self.file_name.clone(),
        }
    }
}

/// Entry returned by the document listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub document_id: String,
    pub file_name: String,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new record. Existing ids are never overwritten.
    async fn insert(&self, record: DocumentRecord) -> AppResult<()>;

    async fn get(&self, document_id: &str) -> AppResult<Option<DocumentRecord>>;

    /// All documents, in store iteration order.
    async fn list(&self) -> AppResult<Vec<DocumentSummary>>;

    async fn len(&self) -> AppResult<usize>;
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, DocumentRecord>,
    order: Vec<String>,
}

/// Process-lifetime store; iteration follows insertion order.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, record: DocumentRecord) -> AppResult<()> {
        let mut guard = self.inner.write().await;
        if guard.records.contains_key(&record.id) {
            return Err(AppError::Internal(format!(
                "Document id {} already exists",
                record.id
            )));
        }
        guard.order.push(record.id.clone());
        guard.records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, document_id: &str) -> AppResult<Option<DocumentRecord>> {
        let guard = self.inner.read().await;
        Ok(guard.records.get(document_id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<DocumentSummary>> {
        let guard = self.inner.read().await;
        Ok(guard
            .order
            .iter()
            .filter_map(|id| guard.records.get(id))
            .map(DocumentRecord::summary)
            .collect())
    }

    async fn len(&self) -> AppResult<usize> {
        Ok(self.inner.read().await.records.len())
    }
}
