//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product.
///
/// Products are defined once when the catalog is built and are never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Free-form category label, matched by exact equality when filtering.
    pub category: String,
    /// Image path or URI.
    pub image: String,
    pub description: String,
    /// What the product is used to treat.
    pub cures: String,
    /// Usage instructions.
    pub uses: String,
}
