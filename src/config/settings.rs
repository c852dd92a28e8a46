//! User settings for Cashly
//!
//! Display preferences plus the name and ordering field of the document
//! collection that holds transaction records.

use serde::{Deserialize, Serialize};

use super::paths::CashlyPaths;
use crate::error::CashlyError;
use crate::models::SortKey;
use crate::store::write_json_atomic;

/// User settings for Cashly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Store collection holding transaction records
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Record field the store orders the collection by
    #[serde(default = "default_order_field")]
    pub order_field: String,

    /// Sort applied to listings when none is given on the command line
    #[serde(default)]
    pub default_sort: SortKey,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₦".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_collection() -> String {
    "transactions".to_string()
}

fn default_order_field() -> String {
    "timestamp".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            collection: default_collection(),
            order_field: default_order_field(),
            default_sort: SortKey::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &CashlyPaths) -> Result<Self, CashlyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CashlyError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CashlyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashlyPaths) -> Result<(), CashlyError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₦");
        assert_eq!(settings.collection, "transactions");
        assert_eq!(settings.order_field, "timestamp");
        assert_eq!(settings.default_sort, SortKey::None);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashlyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.default_sort = SortKey::Amount;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.default_sort, SortKey::Amount);
    }

    #[test]
    fn test_save_replaces_file_atomically() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashlyPaths::with_base_dir(temp_dir.path().to_path_buf());

        Settings::default().save(&paths).unwrap();
        let mut settings = Settings::default();
        settings.date_format = "%d/%m/%Y".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%d/%m/%Y");

        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.collection, "transactions");
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }
}
