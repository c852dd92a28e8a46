//! Display formatting for terminal output
//!
//! Formats transactions and principals for the command line. Report
//! tables live next to the reports themselves.

pub mod session;
pub mod transaction;

pub use session::format_principal;
pub use transaction::{format_transaction_line, format_transaction_row, format_transaction_table};

/// Truncate a string to at most `max` characters, marking the cut with `...`
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}
