//! Service layer for Cashly
//!
//! The service layer sits between the collaborators (document store,
//! identity provider) and presentation: it normalizes raw records, orders
//! them for display, and gates store access on a signed-in principal.

pub mod normalize;
pub mod session;
pub mod sort;
pub mod transaction;

pub use normalize::{ensure_summable, normalize, normalize_record};
pub use session::SessionService;
pub use sort::{sort_chronologically, sorted_by};
pub use transaction::TransactionService;
