//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod report;
pub mod session;
pub mod transaction;

pub use report::{handle_report_command, ReportCommands};
pub use session::{handle_session_command, SessionCommands, PASSWORD_ENV};
pub use transaction::{handle_transaction_command, TransactionCommands};
