//! Core types for Phytomed.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartEntry};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use product::Product;
