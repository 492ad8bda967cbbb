//! The static product catalog.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{CurrencyCode, Price, PriceError, Product, ProductId};

/// Errors building a [`Catalog`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("invalid price for product {id}: {source}")]
    InvalidPrice {
        id: ProductId,
        #[source]
        source: PriceError,
    },
}

/// An immutable, ordered list of products.
///
/// Product ids are unique. The order is the order products were supplied in
/// and is the default display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an ordered list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// The Phytomed sample catalog.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in data is inconsistent.
    pub fn phytomed() -> Result<Self, CatalogError> {
        let usd = |id: i32, cents: i64| {
            Price::from_cents(cents, CurrencyCode::USD).map_err(|source| {
                CatalogError::InvalidPrice {
                    id: ProductId::new(id),
                    source,
                }
            })
        };

        Self::new(vec![
            Product {
                id: ProductId::new(1),
                title: "PhytoBlend Herbal Tea".to_string(),
                price: usd(1, 1500)?,
                category: "Herbal Teas".to_string(),
                image: "images/tonic bottle.jpeg".to_string(),
                description: "A soothing blend of premium medicinal herbs".to_string(),
                cures: "Immune support, digestive health, relaxation".to_string(),
                uses: "Steep 1 teabag in hot water for 5-7 minutes. Drink 2-3 times daily for best results.".to_string(),
            },
            Product {
                id: ProductId::new(2),
                title: "PhytoImmune Capsules".to_string(),
                price: usd(2, 2500)?,
                category: "Immune Support".to_string(),
                image: "images/hero.jpg".to_string(),
                description: "Powerful immune system booster in convenient capsule form".to_string(),
                cures: "Immune enhancement, cold prevention, antioxidant support".to_string(),
                uses: "Take 1-2 capsules daily with water, preferably with meals.".to_string(),
            },
            Product {
                id: ProductId::new(3),
                title: "PhytoSkin Balm".to_string(),
                price: usd(3, 2500)?,
                category: "Skin Care".to_string(),
                image: "images/hero.jpg".to_string(),
                description: "Natural botanical balm for skin rejuvenation".to_string(),
                cures: "Dry skin, skin irritation, eczema relief, natural moisturizing".to_string(),
                uses: "Apply a small amount to affected skin areas 2-3 times daily. Massage gently until absorbed.".to_string(),
            },
        ])
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
