//! Report CLI commands
//!
//! Summary, trend, breakdown and the combined dashboard view.

use clap::Subcommand;
use tracing::debug;

use super::transaction::parse_sort_key;
use crate::auth::Access;
use crate::config::Settings;
use crate::display::format_transaction_table;
use crate::error::{CashlyError, CashlyResult};
use crate::reports::{
    aggregate, category_split, format_breakdown, format_trend, income_expense_split,
    trend_points, Dashboard,
};
use crate::services::{SessionService, TransactionService};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Show total income, total expenses and balance
    Summary,
    /// Show the running balance after each transaction
    Trend,
    /// Show the income/expense split and per-category totals
    Breakdown,
    /// Show summary, trend and transactions together
    Dashboard {
        /// Sort order for the transaction list (none, date, amount, category)
        #[arg(short, long)]
        sort: Option<String>,
    },
}

/// Handle a report command
pub async fn handle_report_command(
    service: &TransactionService,
    session: &SessionService,
    settings: &Settings,
    cmd: ReportCommands,
) -> CashlyResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary => {
            let transactions = service.load_all().await?;
            println!("Balance Summary");
            println!("{}", "=".repeat(35));
            print!("{}", aggregate(&transactions).format_terminal(symbol));
        }

        ReportCommands::Trend => {
            let transactions = service.load_all().await?;
            println!("Balance Trend");
            println!("{}", "=".repeat(35));
            print!(
                "{}",
                format_trend(&trend_points(&transactions), symbol, &settings.date_format)
            );
        }

        ReportCommands::Breakdown => {
            let transactions = service.load_all().await?;
            println!("Income vs Expenses");
            println!("{}", "=".repeat(35));
            print!(
                "{}",
                format_breakdown(
                    &income_expense_split(&transactions),
                    &category_split(&transactions),
                    symbol
                )
            );
        }

        ReportCommands::Dashboard { sort } => {
            let key = parse_sort_key(sort.as_deref(), settings)?;

            let gate = session.gate();
            let principal = match gate.access() {
                Access::Granted(principal) => principal,
                _ => return Err(CashlyError::AuthRequired),
            };
            debug!(user = %principal.id, "opening dashboard");

            let mut dashboard = Dashboard::new();
            dashboard.refresh(service).await?;

            println!("Dashboard for {}", principal.label());
            println!("{}", "=".repeat(35));
            print!("{}", dashboard.summary().format_terminal(symbol));
            println!();
            print!(
                "{}",
                format_trend(&dashboard.trend(), symbol, &settings.date_format)
            );
            println!();
            print!(
                "{}",
                format_transaction_table(&dashboard.sorted(key), settings)
            );
        }
    }

    Ok(())
}
