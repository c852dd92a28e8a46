//! Display orderings selectable by the user

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key used to reorder transactions for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep the order the transactions were loaded in
    #[default]
    None,
    /// Most recent first
    Date,
    /// Largest magnitude first, regardless of direction
    Amount,
    /// Category label, lexicographic
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::None, Self::Date, Self::Amount, Self::Category];
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Date => write!(f, "date"),
            Self::Amount => write!(f, "amount"),
            Self::Category => write!(f, "category"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            // "type" was the label of this option in the web dashboard
            "category" | "type" => Ok(Self::Category),
            other => Err(format!(
                "Unknown sort key '{}'. Expected one of: none, date, amount, category",
                other
            )),
        }
    }
}
