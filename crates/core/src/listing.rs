//! Category filtering and price sorting over the catalog.
//!
//! Control values come straight from the page's selector elements:
//! - category: `"all"` (or nothing) shows everything, any other value must
//!   equal a product's category exactly
//! - sort: `"price-low"`, `"price-high"`, anything else keeps catalog order

use crate::catalog::Catalog;
use crate::types::Product;

/// Which products to show by category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match against [`Product::category`].
    Only(String),
}

impl CategoryFilter {
    /// Control value that selects every category.
    pub const ALL: &'static str = "all";

    /// Interpret a category control value. Missing and empty values mean all.
    #[must_use]
    pub fn from_control(value: Option<&str>) -> Self {
        match value {
            None | Some("" | Self::ALL) => Self::All,
            Some(category) => Self::Only(category.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }
}

/// Display order of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOrder {
    pub const PRICE_LOW: &'static str = "price-low";
    pub const PRICE_HIGH: &'static str = "price-high";

    /// Interpret a sort control value. Unknown values keep catalog order.
    #[must_use]
    pub fn from_control(value: Option<&str>) -> Self {
        match value {
            Some(Self::PRICE_LOW) => Self::PriceLowToHigh,
            Some(Self::PRICE_HIGH) => Self::PriceHighToLow,
            _ => Self::Featured,
        }
    }
}

/// A category filter combined with a sort order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingQuery {
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl ListingQuery {
    #[must_use]
    pub const fn new(category: CategoryFilter, sort: SortOrder) -> Self {
        Self { category, sort }
    }

    /// Select and order products from the catalog.
    ///
    /// Works on a fresh list of references; the catalog itself is never
    /// reordered. Sorting is stable, so products with equal prices keep their
    /// catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let mut list: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| self.category.matches(p))
            .collect();

        match self.sort {
            SortOrder::Featured => {}
            SortOrder::PriceLowToHigh => list.sort_by_key(|p| p.price.amount()),
            SortOrder::PriceHighToLow => {
                list.sort_by(|a, b| b.price.amount().cmp(&a.price.amount()));
            }
        }

        list
    }
}
