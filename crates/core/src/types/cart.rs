//! Shopping cart contents.
//!
//! The cart is persisted as a JSON array of `{"id": <int>, "qty": <int>}`
//! objects. Quantities in a [`Cart`] are always at least one; stored entries
//! with a zero or negative quantity are dropped on decode, leaving the other
//! entries intact.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::ProductId;

/// One line of the cart: a product and how many of it were added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    #[serde(rename = "qty")]
    pub quantity: NonZeroU32,
}

impl CartEntry {
    /// A new entry with quantity one.
    #[must_use]
    pub const fn single(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: NonZeroU32::MIN,
        }
    }
}

/// An entry as found in storage, before quantities are checked.
#[derive(Deserialize)]
struct StoredEntry {
    id: ProductId,
    qty: i64,
}

impl StoredEntry {
    /// The entry with its quantity clamped to `u32`, or `None` when the
    /// quantity is zero or negative.
    fn into_entry(self) -> Option<CartEntry> {
        let qty = if self.qty <= 0 {
            0
        } else {
            u32::try_from(self.qty).unwrap_or(u32::MAX)
        };
        NonZeroU32::new(qty).map(|quantity| CartEntry {
            product_id: self.id,
            quantity,
        })
    }
}

/// The user's selected quantities, unique by product id.
///
/// Entries keep the order in which products were first added. The cart is
/// add-only: there is no way to decrement or remove an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a cart from raw entries, merging duplicate product ids.
    ///
    /// Quantities of repeated ids are summed into the first occurrence, so the
    /// total quantity is unchanged.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        let mut cart = Self::new();
        for entry in entries {
            match cart.entry_mut(entry.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(entry.quantity.get());
                }
                None => cart.entries.push(entry),
            }
        }
        cart
    }

    /// Decode a cart from its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if the input is not a JSON
    /// array of `{"id", "qty"}` objects with integer fields. Entries whose
    /// quantity is not positive are skipped rather than rejected.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Encode the cart to its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Add one unit of a product: increments an existing entry or appends a
    /// new one with quantity one.
    pub fn add(&mut self, product_id: ProductId) {
        match self.entry_mut(product_id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => self.entries.push(CartEntry::single(product_id)),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| u64::from(e.quantity.get()))
            .sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product_id == product_id)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stored = Vec::<StoredEntry>::deserialize(deserializer)?;
        Ok(Self::from_entries(
            stored.into_iter().filter_map(StoredEntry::into_entry),
        ))
    }
}
