//! Phytomed Storefront library.
//!
//! Renders the Phytomed product catalog into a page, keeps the shopping cart
//! in page-local storage and shows product details in a modal.
//!
//! # Architecture
//!
//! - [`dom`] - the in-memory document the page is built in
//! - [`storage`] - key-value storage backends (memory, JSON file)
//! - [`cart`] - cart store and cart-count badges
//! - [`render`] - product grid rendering
//! - [`listing`] - category filter and price sort controls
//! - [`modal`] - product detail overlay
//! - [`page`] - page load wiring and the event dispatch table
//!
//! Everything runs synchronously on the caller's thread; a [`page::Page`]
//! handles one event at a time through `&mut self`.
//!
//! # Example
//!
//! ```
//! use phytomed_storefront::dom::{Document, ElementSpec};
//! use phytomed_storefront::page::{Event, Page};
//! use phytomed_storefront::state::AppState;
//! use phytomed_storefront::storage::MemoryStore;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! doc.append(body, ElementSpec::new("span").class("cart-count"));
//! doc.append(body, ElementSpec::new("div").class("products-grid"));
//!
//! let state = AppState::phytomed().unwrap();
//! let mut page = Page::new(state, doc, MemoryStore::new());
//! page.dispatch(Event::Loaded);
//!
//! let button = page.document().query_class("add-to-cart").unwrap();
//! page.dispatch(Event::Click { target: button });
//! assert_eq!(page.cart().get_cart().total_quantity(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod dom;
pub mod error;
pub mod listing;
pub mod modal;
pub mod page;
pub mod render;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use error::{Result, StorefrontError};
