//! Cumulative trend series
//!
//! Running total of signed amounts, one value per transaction. The input
//! must already be in ascending timestamp order; reordering it changes the
//! output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Money, Transaction};

/// Running balance after each transaction
pub fn cumulative_series(sorted: &[Transaction]) -> Vec<Money> {
    sorted
        .iter()
        .scan(Money::zero(), |running, txn| {
            *running += txn.amount;
            Some(*running)
        })
        .collect()
}

/// One point of the trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// 1-based position, used as the chart label
    pub position: usize,
    pub timestamp: DateTime<Utc>,
    /// Running balance including this transaction
    pub balance: Money,
}

/// The cumulative series paired with position and time
pub fn trend_points(sorted: &[Transaction]) -> Vec<TrendPoint> {
    sorted
        .iter()
        .zip(cumulative_series(sorted))
        .enumerate()
        .map(|(index, (txn, balance))| TrendPoint {
            position: index + 1,
            timestamp: txn.timestamp,
            balance,
        })
        .collect()
}

/// Format the trend as a table with a proportional bar per point
pub fn format_trend(points: &[TrendPoint], currency_symbol: &str, date_format: &str) -> String {
    if points.is_empty() {
        return "No transactions found.\n".to_string();
    }

    const BAR_WIDTH: i64 = 30;
    let peak = points
        .iter()
        .map(|p| p.balance.cents().abs())
        .max()
        .unwrap_or(0)
        .max(1);

    let mut output = String::new();
    output.push_str(&format!("{:>4} {:<12} {:>16}\n", "#", "Date", "Balance"));
    output.push_str(&"-".repeat(34 + BAR_WIDTH as usize));
    output.push('\n');

    for point in points {
        let len = (point.balance.cents().abs() * BAR_WIDTH / peak) as usize;
        let bar = if point.balance.is_negative() {
            "-".repeat(len)
        } else {
            "#".repeat(len)
        };
        output.push_str(&format!(
            "{:>4} {:<12} {:>16} {}\n",
            point.position,
            point.timestamp.format(date_format).to_string(),
            point.balance.format_with_symbol(currency_symbol),
            bar
        ));
    }

    output
}
