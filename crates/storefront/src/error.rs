//! Unified error handling for the storefront page.
//!
//! Only page construction reports errors to the embedding host. Once a page
//! is loaded, every event handler absorbs its failures: storage problems are
//! logged through [`absorb`] and the page keeps working.

use phytomed_core::CatalogError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded or is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The product catalog is inconsistent.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Key-value storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Log a failed event-handler action and carry on.
pub fn absorb<T, E>(action: &str, result: std::result::Result<T, E>) -> Option<T>
where
    E: Into<StorefrontError>,
{
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            let err: StorefrontError = err.into();
            tracing::warn!(action, error = %err, "Storefront action failed");
            None
        }
    }
}
