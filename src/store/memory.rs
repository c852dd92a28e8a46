//! In-memory document store
//!
//! Keeps collections in a map guarded by a lock. Useful for tests and for
//! running the pipeline without touching disk. The store can be switched
//! offline to exercise the failure path of its callers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use super::{order_documents, DocumentStore, OrderDirection};
use crate::error::{CashlyError, CashlyResult};
use crate::models::Document;

/// Document store backed by process memory
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    available: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Put a document with a chosen id straight into a collection
    ///
    /// Bypasses id assignment, which lets tests stage legacy or broken records.
    pub fn seed(&self, collection: &str, document: Document) -> CashlyResult<()> {
        let mut collections = self.collections.write().map_err(|e| {
            CashlyError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    /// Simulate the store going offline (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> CashlyResult<usize> {
        let collections = self.collections.read().map_err(|e| {
            CashlyError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(collections.get(collection).map(Vec::len).unwrap_or(0))
    }

    fn ensure_available(&self) -> CashlyResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CashlyError::StoreUnavailable("store is offline".into()))
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, collection: &str, record: Map<String, Value>) -> CashlyResult<String> {
        self.ensure_available()?;

        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.write().map_err(|e| {
            CashlyError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), record));

        debug!(collection, %id, "inserted document");
        Ok(id)
    }

    async fn query_all(
        &self,
        collection: &str,
        order_by: &str,
        direction: OrderDirection,
    ) -> CashlyResult<Vec<Document>> {
        self.ensure_available()?;

        let mut documents = {
            let collections = self.collections.read().map_err(|e| {
                CashlyError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
            })?;
            collections.get(collection).cloned().unwrap_or_default()
        };
        order_documents(&mut documents, order_by, direction);

        debug!(collection, order_by, %direction, count = documents.len(), "queried collection");
        Ok(documents)
    }
}
