//! Configuration module for Cashly
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CashlyPaths;
pub use settings::Settings;
