//! Transaction model
//!
//! A transaction is a single income or expense event. Direction is encoded
//! only by the sign of `amount`: positive is income, negative is expense.
//! Records that arrive with a separate type tag are folded into the sign by
//! the normalizer and the tag is not kept.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    /// Lowercase label, also used as the fallback category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Apply this direction to a non-negative magnitude
    pub fn apply(&self, magnitude: Money) -> Money {
        match self {
            Self::Income => magnitude.abs(),
            Self::Expense => -magnitude.abs(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}'. Expected 'income' or 'expense'",
                other
            )),
        }
    }
}

/// A normalized financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier assigned by the document store
    pub id: TransactionId,

    /// Free-text label
    #[serde(default)]
    pub description: String,

    /// Signed amount (positive for income, negative for expense)
    pub amount: Money,

    /// When the transaction was recorded; used for ordering only
    pub timestamp: DateTime<Utc>,

    /// Category label used for sorting and the category split
    pub category: String,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        description: impl Into<String>,
        amount: Money,
        timestamp: DateTime<Utc>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            timestamp,
            category: category.into(),
        }
    }

    /// Direction derived from the sign; zero amounts count as income
    pub fn direction(&self) -> Direction {
        if self.amount.is_negative() {
            Direction::Expense
        } else {
            Direction::Income
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount.is_negative() { '-' } else { '+' };
        write!(
            f,
            "{} {} {}{}",
            self.timestamp.format("%Y-%m-%d"),
            self.description,
            sign,
            self.magnitude()
        )
    }
}

/// A transaction as submitted by the user, before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    /// Non-negative magnitude; the sign comes from `direction`
    pub magnitude: Money,
    pub direction: Direction,
    pub category: Option<String>,
}

impl NewTransaction {
    pub fn new(description: impl Into<String>, magnitude: Money, direction: Direction) -> Self {
        Self {
            description: description.into(),
            magnitude: magnitude.abs(),
            direction,
            category: None,
        }
    }

    /// Build from a signed amount ("use negative for expenses")
    pub fn from_signed(description: impl Into<String>, amount: Money) -> Self {
        let direction = if amount.is_negative() {
            Direction::Expense
        } else {
            Direction::Income
        };
        Self::new(description, amount, direction)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let trimmed = category.trim();
        self.category = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn signed_amount(&self) -> Money {
        self.direction.apply(self.magnitude)
    }

    /// Explicit category, or the direction label when none was given
    pub fn category_label(&self) -> String {
        self.category
            .clone()
            .unwrap_or_else(|| self.direction.label().to_string())
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        if self.magnitude.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }
        Ok(())
    }

    /// The document written to the store for this submission
    pub fn to_record(&self, timestamp: DateTime<Utc>) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert(
            "description".into(),
            Value::from(self.description.trim().to_string()),
        );
        record.insert("amount".into(), Value::from(self.signed_amount().to_major()));
        record.insert("category".into(), Value::from(self.category_label()));
        record.insert(
            "timestamp".into(),
            Value::from(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record
    }

    /// The canonical transaction once the store has confirmed the insert
    pub fn into_transaction(self, id: TransactionId, timestamp: DateTime<Utc>) -> Transaction {
        let amount = self.signed_amount();
        let category = self.category_label();
        Transaction::new(id, self.description.trim(), amount, timestamp, category)
    }
}

/// Validation errors for submitted transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    ZeroAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Please enter a description"),
            Self::ZeroAmount => write!(f, "Amount must be non-zero"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
