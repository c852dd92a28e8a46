//! Reports for Cashly
//!
//! Pure derivations over a normalized transaction list: the balance
//! summary, the cumulative trend, the income/expense and category splits,
//! plus the dashboard that holds the list they are computed from.

pub mod breakdown;
pub mod dashboard;
pub mod summary;
pub mod trend;

pub use breakdown::{
    category_split, format_breakdown, income_expense_split, CategoryShare, IncomeExpenseSplit,
};
pub use dashboard::Dashboard;
pub use summary::{aggregate, Summary};
pub use trend::{cumulative_series, format_trend, trend_points, TrendPoint};
