//! Transaction CLI commands
//!
//! Implements `add` and `list`.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_line, format_transaction_table};
use crate::error::{CashlyError, CashlyResult};
use crate::models::{Direction, Money, NewTransaction, SortKey};
use crate::services::{sorted_by, TransactionService};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// What the transaction was for
        description: String,
        /// Amount (e.g. "5,000" or "12.50"); negative means expense unless --type is given
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Transaction type (income, expense)
        #[arg(short = 't', long = "type")]
        direction: Option<String>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List transactions
    List {
        /// Sort order (none, date, amount, category)
        #[arg(short, long)]
        sort: Option<String>,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub async fn handle_transaction_command(
    service: &TransactionService,
    settings: &Settings,
    cmd: TransactionCommands,
) -> CashlyResult<()> {
    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            direction,
            category,
        } => {
            let new = build_submission(&description, &amount, direction.as_deref(), category)?;
            let txn = service.add(new).await?;
            println!("Recorded: {}", format_transaction_line(&txn, settings));
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List { sort, limit } => {
            let key = parse_sort_key(sort.as_deref(), settings)?;
            let transactions = service.load_all().await?;
            let mut shown = sorted_by(&transactions, key);
            if let Some(limit) = limit {
                shown.truncate(limit);
            }
            print!("{}", format_transaction_table(&shown, settings));
        }
    }

    Ok(())
}

/// Build a submission from command-line text
///
/// With an explicit type the amount's magnitude is used; otherwise its sign
/// picks the direction.
pub fn build_submission(
    description: &str,
    amount: &str,
    direction: Option<&str>,
    category: Option<String>,
) -> CashlyResult<NewTransaction> {
    let amount = Money::parse(amount).map_err(|e| {
        CashlyError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '5,000' or '12.50'. Error: {}",
            amount, e
        ))
    })?;

    let new = match direction {
        Some(text) => {
            let direction: Direction = text.parse().map_err(CashlyError::Validation)?;
            NewTransaction::new(description, amount, direction)
        }
        None => NewTransaction::from_signed(description, amount),
    };

    Ok(match category {
        Some(category) => new.with_category(category),
        None => new,
    })
}

/// Parse a sort key argument, falling back to the configured default
pub fn parse_sort_key(text: Option<&str>, settings: &Settings) -> CashlyResult<SortKey> {
    match text {
        Some(text) => text.parse().map_err(CashlyError::Validation),
        None => Ok(settings.default_sort),
    }
}
