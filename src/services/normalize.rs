//! Entry normalizer
//!
//! Turns raw store documents into canonical [`Transaction`]s. Documents
//! written by this crate carry `description`, a signed `amount`, `category`
//! and an RFC 3339 `timestamp`. Older documents from the web client use
//! `text` for the label, a `type` tag with a non-negative magnitude, and
//! `date` or `createdAt` for the time; those are accepted here and folded
//! into the signed representation so nothing downstream sees the tag.
//!
//! Normalization is all-or-nothing: one malformed document fails the whole
//! batch, so a bad record can never be silently left out of a total.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CashlyError, CashlyResult};
use crate::models::{Direction, Document, Money, Transaction, TransactionId};

/// Fields that may carry the record time, in order of preference
const TIMESTAMP_FIELDS: [&str; 3] = ["timestamp", "date", "createdAt"];

/// Normalize a batch of documents
///
/// Fails with `MalformedRecord` on the first document that cannot be
/// normalized or whose id repeats an earlier one.
pub fn normalize(records: &[Document]) -> CashlyResult<Vec<Transaction>> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut transactions = Vec::with_capacity(records.len());

    for record in records {
        let transaction = normalize_record(record).map_err(|e| {
            warn!(error = %e, "rejecting batch with malformed record");
            e
        })?;

        if !seen.insert(transaction.id.clone()) {
            warn!(id = %transaction.id, "rejecting batch with duplicate id");
            return Err(CashlyError::malformed(
                transaction.id.as_str(),
                "duplicate id in collection",
            ));
        }
        transactions.push(transaction);
    }

    ensure_summable(&transactions).map_err(|e| {
        warn!(error = %e, "rejecting batch whose total is out of range");
        e
    })?;

    debug!(count = transactions.len(), "normalized records");
    Ok(transactions)
}

/// Check that the magnitudes of `transactions` sum without overflow
///
/// Every total and running balance over a subset is bounded by this sum, so
/// a list that passes can be aggregated with plain arithmetic.
pub fn ensure_summable(transactions: &[Transaction]) -> CashlyResult<()> {
    let mut total = Money::zero();
    for txn in transactions {
        total = total.checked_add(txn.magnitude()).ok_or_else(|| {
            CashlyError::malformed(txn.id.as_str(), "amounts exceed the representable total")
        })?;
    }
    Ok(())
}

/// Normalize a single document
pub fn normalize_record(record: &Document) -> CashlyResult<Transaction> {
    let id = record.id.trim();
    if id.is_empty() {
        return Err(CashlyError::malformed("<unknown>", "missing id"));
    }

    let magnitude = match record.get("amount") {
        None => return Err(CashlyError::malformed(id, "missing amount")),
        Some(value) => {
            let major = value.as_f64().ok_or_else(|| {
                CashlyError::malformed(id, format!("amount {} is not numeric", value))
            })?;
            Money::from_major(major).ok_or_else(|| {
                CashlyError::malformed(id, format!("amount {} is out of range", value))
            })?
        }
    };

    let type_tag = match record.get("type") {
        None => None,
        Some(Value::String(tag)) => Some(
            tag.parse::<Direction>()
                .map_err(|_| CashlyError::malformed(id, format!("unknown type '{}'", tag)))?,
        ),
        Some(other) => {
            return Err(CashlyError::malformed(
                id,
                format!("type {} is not a string", other),
            ))
        }
    };

    // A type tag wins over the sign of the stored number
    let amount = match type_tag {
        Some(direction) => direction.apply(magnitude),
        None => magnitude,
    };

    let timestamp = read_timestamp(id, record)?;

    let description = record
        .get("description")
        .or_else(|| record.get("text"))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let category = record
        .get("category")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let direction = type_tag.unwrap_or(if amount.is_negative() {
                Direction::Expense
            } else {
                Direction::Income
            });
            direction.label().to_string()
        });

    Ok(Transaction::new(
        TransactionId::new(id),
        description,
        amount,
        timestamp,
        category,
    ))
}

fn read_timestamp(id: &str, record: &Document) -> CashlyResult<DateTime<Utc>> {
    for field in TIMESTAMP_FIELDS {
        if let Some(value) = record.get(field) {
            return parse_timestamp(value).ok_or_else(|| {
                CashlyError::malformed(id, format!("unreadable timestamp in '{}': {}", field, value))
            });
        }
    }
    Err(CashlyError::malformed(id, "missing timestamp"))
}

/// Parse the timestamp shapes found in stored records
///
/// Accepts RFC 3339 strings, naive ISO date-times and plain dates (read as
/// UTC), epoch milliseconds, and `{seconds, nanoseconds}` objects (also with
/// leading underscores, as exported by the hosted store).
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(naive.and_utc());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let ms = n.as_f64()?.round();
                    if !ms.is_finite() || ms.abs() > i64::MAX as f64 {
                        return None;
                    }
                    ms as i64
                }
            };
            DateTime::from_timestamp_millis(millis)
        }
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        Document::from_value(id, value)
    }

    #[test]
    fn test_canonical_record() {
        let txn = normalize_record(&doc(
            "t1",
            json!({
                "description": "Salary",
                "amount": 5000,
                "category": "work",
                "timestamp": "2025-01-15T09:30:00.000Z"
            }),
        ))
        .unwrap();

        assert_eq!(txn.id.as_str(), "t1");
        assert_eq!(txn.description, "Salary");
        assert_eq!(txn.amount, Money::from_units(5000));
        assert_eq!(txn.category, "work");
        assert_eq!(
            txn.timestamp,
            Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_type_tag_folds_into_sign() {
        let expense = normalize_record(&doc(
            "t1",
            json!({"type": "expense", "description": "Rent", "amount": 1200, "date": "2025-01-01T00:00:00Z"}),
        ))
        .unwrap();
        assert_eq!(expense.amount, Money::from_units(-1200));
        assert_eq!(expense.category, "expense");

        // Tag wins even when the stored number carries the opposite sign
        let income = normalize_record(&doc(
            "t2",
            json!({"type": "income", "amount": -300, "date": "2025-01-02T00:00:00Z"}),
        ))
        .unwrap();
        assert_eq!(income.amount, Money::from_units(300));
    }

    #[test]
    fn test_legacy_text_and_created_at() {
        let txn = normalize_record(&doc(
            "t1",
            json!({"text": "Groceries", "amount": -45.5, "createdAt": {"seconds": 1736899200, "nanoseconds": 0}}),
        ))
        .unwrap();

        assert_eq!(txn.description, "Groceries");
        assert_eq!(txn.amount, Money::from_cents(-4550));
        assert_eq!(txn.category, "expense");
        assert_eq!(txn.timestamp, DateTime::from_timestamp(1736899200, 0).unwrap());
    }

    #[test]
    fn test_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        for value in [
            json!("2025-01-15T00:00:00Z"),
            json!("2025-01-15T01:00:00+01:00"),
            json!("2025-01-15T00:00:00"),
            json!("2025-01-15"),
            json!(expected.timestamp_millis()),
            json!({"_seconds": expected.timestamp(), "_nanoseconds": 0}),
        ] {
            assert_eq!(parse_timestamp(&value), Some(expected), "value: {}", value);
        }
        assert_eq!(parse_timestamp(&json!("yesterday")), None);
        assert_eq!(parse_timestamp(&json!(true)), None);
    }

    #[test]
    fn test_missing_amount_is_malformed() {
        let err = normalize_record(&doc(
            "t1",
            json!({"description": "Coffee", "timestamp": "2025-01-15T00:00:00Z"}),
        ))
        .unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("missing amount"));
    }

    #[test]
    fn test_non_numeric_amount_is_malformed() {
        let err = normalize_record(&doc(
            "t1",
            json!({"amount": "12", "timestamp": "2025-01-15T00:00:00Z"}),
        ))
        .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_out_of_range_amount_is_malformed() {
        for amount in [json!(5e16), json!(-92233720368547758.08)] {
            let err = normalize_record(&doc(
                "huge",
                json!({"type": "expense", "amount": amount, "timestamp": "2025-01-15T00:00:00Z"}),
            ))
            .unwrap_err();
            assert!(err.is_malformed());
            assert!(err.to_string().contains("out of range"), "{}", err);
        }
    }

    #[test]
    fn test_batch_of_huge_amounts_is_malformed() {
        let records = vec![
            doc("a", json!({"amount": 5e16, "timestamp": "2025-01-01T00:00:00Z"})),
            doc("b", json!({"amount": 5e16, "timestamp": "2025-01-02T00:00:00Z"})),
        ];
        assert!(normalize(&records).unwrap_err().is_malformed());
    }

    #[test]
    fn test_ensure_summable_rejects_overflowing_total() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let max = Money::from_cents(crate::models::MAX_AMOUNT_CENTS);
        let count = (i64::MAX / crate::models::MAX_AMOUNT_CENTS) as usize;

        let mut txns: Vec<_> = (0..count)
            .map(|i| Transaction::new(i.to_string().into(), "big", max, at, "x"))
            .collect();
        assert!(ensure_summable(&txns).is_ok());

        txns.push(Transaction::new("last".into(), "big", -max, at, "x"));
        let err = ensure_summable(&txns).unwrap_err();
        assert!(matches!(err, CashlyError::MalformedRecord { ref id, .. } if id == "last"));
    }

    #[test]
    fn test_missing_timestamp_is_malformed() {
        let err = normalize_record(&doc("t1", json!({"amount": 12}))).unwrap_err();
        assert!(err.to_string().contains("missing timestamp"));

        let err = normalize_record(&doc("t1", json!({"amount": 12, "date": "soon"}))).unwrap_err();
        assert!(err.to_string().contains("unreadable timestamp"));
    }

    #[test]
    fn test_unknown_type_tag_is_malformed() {
        let err = normalize_record(&doc(
            "t1",
            json!({"type": "transfer", "amount": 12, "timestamp": "2025-01-15T00:00:00Z"}),
        ))
        .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = normalize_record(&doc(
            "  ",
            json!({"amount": 12, "timestamp": "2025-01-15T00:00:00Z"}),
        ))
        .unwrap_err();
        assert!(err.to_string().contains("missing id"));
    }

    #[test]
    fn test_batch_fails_on_any_bad_record() {
        let records = vec![
            doc("ok", json!({"amount": 5000, "timestamp": "2025-01-01T00:00:00Z"})),
            doc("bad", json!({"timestamp": "2025-01-02T00:00:00Z"})),
        ];
        let err = normalize(&records).unwrap_err();
        assert!(matches!(err, CashlyError::MalformedRecord { ref id, .. } if id == "bad"));
    }

    #[test]
    fn test_batch_rejects_duplicate_ids() {
        let records = vec![
            doc("same", json!({"amount": 1, "timestamp": "2025-01-01T00:00:00Z"})),
            doc("same", json!({"amount": 2, "timestamp": "2025-01-02T00:00:00Z"})),
        ];
        let err = normalize(&records).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let records = vec![
            doc("b", json!({"amount": 1, "timestamp": "2025-02-01T00:00:00Z"})),
            doc("a", json!({"amount": 2, "timestamp": "2025-01-01T00:00:00Z"})),
        ];
        let txns = normalize(&records).unwrap();
        let ids: Vec<_> = txns.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
