//! Cart store backed by page-local storage.
//!
//! The cart lives under a single storage key and is re-read on every
//! operation, so two pages sharing a storage backend see each other's adds.
//! Reads never fail: missing or undecodable data is an empty cart.

use phytomed_core::{Cart, ProductId};
use tracing::instrument;

use crate::dom::Document;
use crate::storage::{KeyValueStore, StorageError};

/// Reads and writes the cart and keeps cart-count badges in sync.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    count_class: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store over `storage`, keeping the cart under `key` and
    /// updating every element with class `count_class`.
    pub fn new(storage: S, key: impl Into<String>, count_class: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            count_class: count_class.into(),
        }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the current cart.
    ///
    /// An absent key, a storage read error and a decode failure all yield
    /// an empty cart.
    #[must_use]
    pub fn get_cart(&self) -> Cart {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read cart, using empty cart");
                return Cart::new();
            }
        };

        Cart::decode(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "Stored cart is unreadable, using empty cart");
            Cart::new()
        })
    }

    /// Write `cart` back to storage, then refresh the cart-count badges.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cart cannot be encoded or written. The
    /// badges are left untouched in that case.
    pub fn set_cart(&mut self, cart: &Cart, document: &mut Document) -> Result<(), StorageError> {
        let raw = cart.encode()?;
        self.storage.set(&self.key, &raw)?;
        self.update_cart_count(document);
        Ok(())
    }

    /// Add one unit of `product_id` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the updated cart cannot be written.
    #[instrument(skip(self, document))]
    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        document: &mut Document,
    ) -> Result<Cart, StorageError> {
        let mut cart = self.get_cart();
        cart.add(product_id);
        self.set_cart(&cart, document)?;
        tracing::debug!(total = cart.total_quantity(), "Added to cart");
        Ok(cart)
    }

    /// Write the total quantity into every cart-count badge on the page.
    ///
    /// Returns the total. Pages without badges are fine.
    pub fn update_cart_count(&self, document: &mut Document) -> u64 {
        let total = self.get_cart().total_quantity();
        let text = total.to_string();
        for badge in document.query_class_all(&self.count_class) {
            document.set_text(badge, text.clone());
        }
        total
    }
}
