//! Document store collaborators
//!
//! The tracker persists transactions in an external document database. This
//! module defines the narrow interface the rest of the crate consumes
//! (`DocumentStore`) plus two local implementations: an in-memory store and
//! a JSON-file store with atomic writes.
//!
//! Each call either fully succeeds or fails with
//! [`CashlyError::StoreUnavailable`](crate::error::CashlyError). Nothing is
//! retried here; callers report failures upward.

pub mod file_io;
pub mod json_file;
pub mod memory;

pub use file_io::{read_json, write_json_atomic};
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use std::cmp::Ordering;
use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::CashlyResult;
use crate::models::Document;

/// Sort direction for collection queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Interface to the document database holding transaction records
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a record into a collection and return the id the store assigned
    async fn insert(&self, collection: &str, record: Map<String, Value>) -> CashlyResult<String>;

    /// Fetch every record of a collection ordered by one field
    async fn query_all(
        &self,
        collection: &str,
        order_by: &str,
        direction: OrderDirection,
    ) -> CashlyResult<Vec<Document>>;
}

/// Order documents by a field, the way both local stores answer queries
///
/// Documents lacking the field are kept (they sort first when ascending) so
/// that the normalizer gets to reject them instead of the store hiding them.
/// The sort is stable, so ties keep insertion order.
pub fn order_documents(documents: &mut [Document], field: &str, direction: OrderDirection) {
    documents.sort_by(|a, b| {
        let ordering = compare_values(a.get(field), b.get(field));
        match direction {
            OrderDirection::Ascending => ordering,
            OrderDirection::Descending => ordering.reverse(),
        }
    });
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::Object(map)) if map.contains_key("seconds") => 3,
        Some(Value::String(_)) => 4,
        Some(_) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Object(x)), Some(Value::Object(y)))
            if x.contains_key("seconds") && y.contains_key("seconds") =>
        {
            let key = |m: &Map<String, Value>| {
                (
                    m.get("seconds").and_then(Value::as_i64).unwrap_or(0),
                    m.get("nanoseconds").and_then(Value::as_i64).unwrap_or(0),
                )
            };
            key(x).cmp(&key(y))
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
