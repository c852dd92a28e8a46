//! Path management for Cashly
//!
//! ## Path Resolution Order
//!
//! 1. `CASHLY_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cashly` or `~/.config/cashly`
//! 3. Windows: `%APPDATA%\cashly`

use std::path::PathBuf;

use crate::error::CashlyError;

/// Manages all paths used by Cashly
#[derive(Debug, Clone)]
pub struct CashlyPaths {
    base_dir: PathBuf,
}

impl CashlyPaths {
    /// Create a new CashlyPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no base directory can be determined.
    pub fn new() -> Result<Self, CashlyError> {
        let base_dir = if let Ok(custom) = std::env::var("CASHLY_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CashlyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON document file per collection
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the local identity provider's account file
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// Get the path to the persisted sign-in session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CashlyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CashlyError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CashlyError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CashlyError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                CashlyError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("cashly"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CashlyError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CashlyError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("cashly"))
}
