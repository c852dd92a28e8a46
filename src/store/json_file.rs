//! JSON-file document store
//!
//! Each collection lives in `<data_dir>/<collection>.json`. Every insert
//! rewrites the collection file atomically, so a crash leaves either the old
//! or the new contents on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use super::file_io::{read_json, write_json_atomic};
use super::{order_documents, DocumentStore, OrderDirection};
use crate::error::{CashlyError, CashlyResult};
use crate::models::Document;

/// Serializable collection file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CollectionData {
    documents: Vec<Document>,
}

/// Document store persisting collections as JSON files
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn collection_path(&self, collection: &str) -> CashlyResult<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CashlyError::Validation(format!(
                "Invalid collection name '{}'",
                collection
            )));
        }
        Ok(self.data_dir.join(format!("{}.json", collection)))
    }

    fn load(&self, collection: &str) -> CashlyResult<CollectionData> {
        let path = self.collection_path(collection)?;
        read_json(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to read collection");
            CashlyError::StoreUnavailable(e.to_string())
        })
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn insert(&self, collection: &str, record: Map<String, Value>) -> CashlyResult<String> {
        let path = self.collection_path(collection)?;
        let mut data = self.load(collection)?;

        let id = Uuid::new_v4().simple().to_string();
        data.documents.push(Document::new(id.clone(), record));

        write_json_atomic(&path, &data).map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to write collection");
            CashlyError::StoreUnavailable(e.to_string())
        })?;

        debug!(collection, %id, "inserted document");
        Ok(id)
    }

    async fn query_all(
        &self,
        collection: &str,
        order_by: &str,
        direction: OrderDirection,
    ) -> CashlyResult<Vec<Document>> {
        let mut documents = self.load(collection)?.documents;
        order_documents(&mut documents, order_by, direction);

        debug!(collection, order_by, %direction, count = documents.len(), "queried collection");
        Ok(documents)
    }
}
