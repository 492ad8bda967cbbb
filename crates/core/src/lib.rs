//! Phytomed Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront page:
//! products, prices, the static catalog, the shopping cart and the listing
//! query used for filtering and sorting.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no document handling. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and prices, products and carts
//! - [`catalog`] - The immutable, ordered product catalog
//! - [`listing`] - Category filter and price sort over the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod listing;
pub mod types;

pub use catalog::{Catalog, CatalogError};
pub use listing::{CategoryFilter, ListingQuery, SortOrder};
pub use types::*;
