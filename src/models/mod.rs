//! Core data models for Cashly
//!
//! This module contains the data structures of the tracking domain: the
//! canonical transaction, money amounts, raw store documents and sort keys.

pub mod document;
pub mod ids;
pub mod money;
pub mod sort_key;
pub mod transaction;

pub use document::Document;
pub use ids::{TransactionId, UserId};
pub use money::{Money, MoneyParseError, MAX_AMOUNT_CENTS};
pub use sort_key::SortKey;
pub use transaction::{Direction, NewTransaction, Transaction};
