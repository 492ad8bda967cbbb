//! Application state shared across pages.

use std::sync::Arc;

use phytomed_core::Catalog;

use crate::config::StorefrontConfig;
use crate::error::Result;

/// Application state shared by every page and controller.
///
/// This struct is cheaply cloneable via `Arc` and provides read-only access
/// to the configuration and the product catalog.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        })
    }

    /// State for the stock Phytomed page: default configuration and the
    /// built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog is inconsistent.
    pub fn phytomed() -> Result<Self> {
        Self::new(StorefrontConfig::default(), Catalog::phytomed()?)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
