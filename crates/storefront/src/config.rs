//! Storefront page configuration.
//!
//! Every field has a default matching the stock Phytomed page, so an empty
//! JSON object (`{}`) is a valid configuration.
//!
//! # Fields
//!
//! - `storage_key` - storage key holding the encoded cart (default: `cart`)
//! - `storage` - storage backend: `{"kind": "memory"}` (default) or
//!   `{"kind": "file", "path": "..."}`
//! - `selectors` - class and id markers the page uses, see [`Selectors`]

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration value {0}: {1}")]
    InvalidValue(String, String),
}

/// Storefront page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Storage key for the encoded cart
    pub storage_key: String,
    /// Where the key-value storage lives
    pub storage: StorageBackend,
    /// DOM markers recognized on the page
    pub selectors: Selectors,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: "cart".to_string(),
            storage: StorageBackend::default(),
            selectors: Selectors::default(),
        }
    }
}

/// Key-value storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageBackend {
    /// Kept in memory for the lifetime of the page.
    #[default]
    Memory,
    /// Persisted to a JSON file shared by every page using the same path.
    File { path: PathBuf },
}

/// Class and id markers the page is wired through.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    /// Class of the product grid container
    pub products_grid: String,
    /// Class of every cart-count badge
    pub cart_count: String,
    /// Id of the category `<select>`
    pub category_filter: String,
    /// Id of the sort `<select>`
    pub sort_filter: String,
    /// Id of the product detail overlay
    pub modal: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            products_grid: "products-grid".to_string(),
            cart_count: "cart-count".to_string(),
            category_filter: "category-filter".to_string(),
            sort_filter: "sort-filter".to_string(),
            modal: "product-modal".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Parse and validate configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed, has unknown
    /// fields, or contains an empty key, selector or storage path.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that no required value is empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("storage_key", &self.storage_key)?;

        if let StorageBackend::File { path } = &self.storage {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "storage.path".to_string(),
                    "must not be empty".to_string(),
                ));
            }
        }

        let s = &self.selectors;
        require_non_empty("selectors.products_grid", &s.products_grid)?;
        require_non_empty("selectors.cart_count", &s.cart_count)?;
        require_non_empty("selectors.category_filter", &s.category_filter)?;
        require_non_empty("selectors.sort_filter", &s.sort_filter)?;
        require_non_empty("selectors.modal", &s.modal)?;
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue(
            field.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if value.chars().any(char::is_whitespace) && field.starts_with("selectors.") {
        return Err(ConfigError::InvalidValue(
            field.to_string(),
            format!("must be a single class or id, got {value:?}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = StorefrontConfig::from_json("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.selectors.products_grid, "products-grid");
        assert_eq!(config.selectors.modal, "product-modal");
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_file_backend() {
        let config =
            StorefrontConfig::from_json(r#"{"storage": {"kind": "file", "path": "/tmp/s.json"}}"#)
                .unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::File {
                path: PathBuf::from("/tmp/s.json")
            }
        );
    }

    #[test]
    fn test_partial_selectors() {
        let config =
            StorefrontConfig::from_json(r#"{"selectors": {"cart_count": "badge"}}"#).unwrap();
        assert_eq!(config.selectors.cart_count, "badge");
        assert_eq!(config.selectors.sort_filter, "sort-filter");
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = StorefrontConfig::from_json(r#"{"storage_key": " "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(field, _) if field == "storage_key"));
    }

    #[test]
    fn test_selector_with_space_rejected() {
        let err =
            StorefrontConfig::from_json(r#"{"selectors": {"modal": "product modal"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(field, _) if field == "selectors.modal"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = StorefrontConfig::from_json(r#"{"storage": {"kind": "file", "path": ""}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(field, _) if field == "storage.path"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = StorefrontConfig::from_json(r#"{"currency": "EUR"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
