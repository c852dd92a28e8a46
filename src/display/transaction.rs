//! Transaction display formatting
//!
//! Formats transactions for terminal output as single lines and tables.

use crate::config::Settings;
use crate::models::Transaction;

/// Format a transaction as one sentence, e.g. `[income] Salary ₦5,000 on 2025-01-15`
pub fn format_transaction_line(txn: &Transaction, settings: &Settings) -> String {
    format!(
        "[{}] {} {} on {}",
        txn.direction(),
        txn.description,
        txn.magnitude().format_with_symbol(&settings.currency_symbol),
        txn.timestamp.format(&settings.date_format)
    )
}

/// Format a single transaction as a table row
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    format!(
        "{:<12} {:<24} {:<14} {:>16}",
        txn.timestamp.format(&settings.date_format).to_string(),
        super::truncate(&txn.description, 24),
        super::truncate(&txn.category, 14),
        txn.amount.format_with_symbol(&settings.currency_symbol)
    )
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<24} {:<14} {:>16}\n",
        "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(69));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    output
}
