//! Raw documents as returned by the document store
//!
//! Field presence and typing are not guaranteed; the normalizer is the only
//! place that turns a `Document` into a `Transaction`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record: the store-assigned id plus whatever fields were written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Build a document from a JSON object literal, ignoring non-object values
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        let data = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, data)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field).filter(|v| !v.is_null())
    }
}
