//! Cashly - personal income and expense tracker
//!
//! Users sign in, record income and expense entries, and view aggregated
//! totals and trend series. The core is the pipeline that turns the raw
//! records held by a document store into display figures:
//!
//! - normalization of stored records into signed [`models::Transaction`]s
//! - aggregation into income, expense and balance totals
//! - the cumulative running-balance series
//! - user-selected display orderings
//!
//! # Architecture
//!
//! - `auth`: identity provider interface, auth-state observer and gate
//! - `store`: document store interface and local implementations
//! - `config`: configuration and path management
//! - `error`: custom error types
//! - `models`: money, transactions and raw documents
//! - `services`: normalization, sorting and the session/transaction services
//! - `reports`: summary, trend, splits and the dashboard
//! - `display` / `cli`: terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use cashly::reports::aggregate;
//! use cashly::services::normalize;
//!
//! let transactions = normalize(&documents)?;
//! let summary = aggregate(&transactions);
//! println!("{}", summary.balance);
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod store;

pub use error::{CashlyError, CashlyResult};
