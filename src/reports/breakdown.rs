//! Chart-ready splits of a transaction set
//!
//! The income-vs-expense split backs the two-slice pie; the category split
//! groups by category label.

use std::collections::HashMap;

use serde::Serialize;

use super::summary::aggregate;
use crate::display::truncate;
use crate::models::{Money, Transaction};

/// The two slices of the income/expense pie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IncomeExpenseSplit {
    pub income: Money,
    pub expense: Money,
}

impl IncomeExpenseSplit {
    fn total(&self) -> Money {
        self.income + self.expense
    }

    /// Share of income in percent; 0 when there is nothing to split
    pub fn income_percentage(&self) -> f64 {
        percentage(self.income, self.total())
    }

    /// Share of expense in percent; 0 when there is nothing to split
    pub fn expense_percentage(&self) -> f64 {
        percentage(self.expense, self.total())
    }
}

/// Totals for one category label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    /// Magnitude of expenses in this category
    pub expense_total: Money,
    pub income_total: Money,
    pub transaction_count: usize,
    /// Percent of all expenses
    pub expense_share: f64,
}

fn percentage(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

pub fn income_expense_split(transactions: &[Transaction]) -> IncomeExpenseSplit {
    let summary = aggregate(transactions);
    IncomeExpenseSplit {
        income: summary.income_total,
        expense: summary.expense_total,
    }
}

/// Per-category totals, largest expense first, ties by name
pub fn category_split(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut groups: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for txn in transactions {
        groups.entry(txn.category.as_str()).or_default().push(txn);
    }

    let total_expense = aggregate(transactions).expense_total;

    let mut shares: Vec<CategoryShare> = groups
        .into_iter()
        .map(|(category, txns)| {
            let expense_total: Money = txns
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| t.magnitude())
                .sum();
            let income_total: Money = txns
                .iter()
                .filter(|t| t.is_income())
                .map(|t| t.amount)
                .sum();
            CategoryShare {
                category: category.to_string(),
                expense_total,
                income_total,
                transaction_count: txns.len(),
                expense_share: percentage(expense_total, total_expense),
            }
        })
        .collect();

    shares.sort_by(|a, b| {
        b.expense_total
            .cmp(&a.expense_total)
            .then_with(|| a.category.cmp(&b.category))
    });
    shares
}

/// Format both splits for terminal display
pub fn format_breakdown(
    split: &IncomeExpenseSplit,
    categories: &[CategoryShare],
    currency_symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:>16} {:>7.1}%\n",
        "Income",
        split.income.format_with_symbol(currency_symbol),
        split.income_percentage()
    ));
    output.push_str(&format!(
        "{:<10} {:>16} {:>7.1}%\n",
        "Expense",
        split.expense.format_with_symbol(currency_symbol),
        split.expense_percentage()
    ));
    output.push('\n');

    if categories.is_empty() {
        output.push_str("No transactions found.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<20} {:>16} {:>16} {:>5} {:>8}\n",
        "Category", "Expense", "Income", "Count", "Share"
    ));
    output.push_str(&"-".repeat(69));
    output.push('\n');

    for share in categories {
        output.push_str(&format!(
            "{:<20} {:>16} {:>16} {:>5} {:>7.1}%\n",
            truncate(&share.category, 20),
            share.expense_total.format_with_symbol(currency_symbol),
            share.income_total.format_with_symbol(currency_symbol),
            share.transaction_count,
            share.expense_share
        ));
    }

    output
}
