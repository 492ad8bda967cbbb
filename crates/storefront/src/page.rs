//! Page lifecycle and event dispatch.
//!
//! A [`Page`] owns the document and the cart store and holds a handle to the
//! shared [`AppState`]. Loading the page wires up whatever features the
//! document supports; afterwards every [`Event`] is routed through an
//! explicit [`DispatchTable`] that maps a [`Marker`] to a handler.
//!
//! # Features wired on load
//!
//! - product modal (always created)
//! - grid rendering, add-to-cart and product image clicks (when the page has
//!   a grid)
//! - category and sort changes (when the page has a grid and the control)
//! - cart-count badges (always refreshed)

use phytomed_core::ProductId;
use tracing::instrument;

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::dom::{Document, NodeId};
use crate::error::{Result, absorb};
use crate::listing::ListingControls;
use crate::modal::{Modal, ModalState};
use crate::render::{DATA_ID, classes};
use crate::state::AppState;
use crate::storage::{BackingStore, KeyValueStore};

/// Something the user or the host did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The document finished loading.
    Loaded,
    /// A click whose innermost target is the given element.
    Click { target: NodeId },
    /// A form control's value changed.
    Change { target: NodeId },
}

/// UI markers an event can be routed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// An add-to-cart button inside the grid.
    AddToCart,
    /// A product image inside the grid.
    ProductImage,
    /// The modal's close control.
    ModalClose,
    /// The modal's dimmed backdrop.
    ModalBackdrop,
    /// The category selector.
    CategoryFilter,
    /// The sort selector.
    SortFilter,
}

/// An event handler.
pub type Handler<S> = fn(&mut Page<S>, NodeId);

/// Routes from markers to handlers, one table per event kind.
///
/// Routes run in registration order; a click can match several routes (for
/// example the grid and the window both seeing it).
pub struct DispatchTable<S> {
    click: Vec<(Marker, Handler<S>)>,
    change: Vec<(Marker, Handler<S>)>,
}

impl<S> Default for DispatchTable<S> {
    fn default() -> Self {
        Self {
            click: Vec::new(),
            change: Vec::new(),
        }
    }
}

impl<S> std::fmt::Debug for DispatchTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("click", &self.click.iter().map(|(m, _)| m).collect::<Vec<_>>())
            .field("change", &self.change.iter().map(|(m, _)| m).collect::<Vec<_>>())
            .finish()
    }
}

impl<S> DispatchTable<S> {
    pub fn on_click(&mut self, marker: Marker, handler: Handler<S>) {
        self.click.push((marker, handler));
    }

    pub fn on_change(&mut self, marker: Marker, handler: Handler<S>) {
        self.change.push((marker, handler));
    }

    /// Markers with a click route, in order.
    pub fn click_markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.click.iter().map(|(m, _)| *m)
    }

    /// Markers with a change route, in order.
    pub fn change_markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.change.iter().map(|(m, _)| *m)
    }
}

/// Elements located when the page loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Anchors {
    listing: Option<ListingControls>,
    modal: Option<Modal>,
}

/// A loaded storefront page.
#[derive(Debug)]
pub struct Page<S> {
    state: AppState,
    document: Document,
    cart: CartStore<S>,
    anchors: Anchors,
    routes: DispatchTable<S>,
    loaded: bool,
}

impl Page<BackingStore> {
    /// Create a page using the storage backend named in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn open(state: AppState, document: Document) -> Result<Self> {
        state.config().validate()?;
        let storage = BackingStore::open(&state.config().storage);
        Ok(Self::new(state, document, storage))
    }
}

impl<S: KeyValueStore> Page<S> {
    /// Create an unloaded page over `document` and `storage`.
    pub fn new(state: AppState, document: Document, storage: S) -> Self {
        let config = state.config();
        let cart = CartStore::new(
            storage,
            config.storage_key.clone(),
            config.selectors.cart_count.clone(),
        );
        Self {
            state,
            document,
            cart,
            anchors: Anchors::default(),
            routes: DispatchTable::default(),
            loaded: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    fn config(&self) -> &StorefrontConfig {
        self.state.config()
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for the host, e.g. to change a selector's value before
    /// dispatching the matching [`Event::Change`].
    pub const fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub const fn routes(&self) -> &DispatchTable<S> {
        &self.routes
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current modal state; hidden before the page is loaded.
    #[must_use]
    pub fn modal_state(&self) -> ModalState {
        self.anchors
            .modal
            .as_ref()
            .map_or(ModalState::Hidden, Modal::state)
    }

    /// The grid container, if the page has one.
    #[must_use]
    pub fn grid(&self) -> Option<NodeId> {
        self.anchors.listing.map(|l| l.grid)
    }

    /// Handle one event to completion.
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::Loaded => self.load(),
            Event::Click { target } => self.run_routes(target, true),
            Event::Change { target } => self.run_routes(target, false),
        }
    }

    /// Wire the page up. Only the first call has any effect.
    #[instrument(skip(self))]
    pub fn load(&mut self) {
        if self.loaded {
            tracing::debug!("Page already loaded");
            return;
        }
        self.loaded = true;

        let modal_id = self.config().selectors.modal.clone();
        self.anchors.modal = Some(Modal::ensure(&mut self.document, &modal_id));

        self.anchors.listing = ListingControls::locate(&self.document, &self.config().selectors);
        if let Some(listing) = self.anchors.listing {
            let catalog = self.state.catalog();
            let products: Vec<_> = catalog.products().iter().collect();
            crate::render::render_products_grid(&mut self.document, listing.grid, &products);

            self.routes.on_click(Marker::AddToCart, Self::on_add_to_cart);
            self.routes.on_click(Marker::ProductImage, Self::on_product_image);
            if listing.category.is_some() {
                self.routes.on_change(Marker::CategoryFilter, Self::on_filter_change);
            }
            if listing.sort.is_some() {
                self.routes.on_change(Marker::SortFilter, Self::on_filter_change);
            }
        } else {
            tracing::debug!("No product grid on page, listing features inactive");
        }

        let total = self.cart.update_cart_count(&mut self.document);

        self.routes.on_click(Marker::ModalClose, Self::on_modal_close);
        self.routes.on_click(Marker::ModalBackdrop, Self::on_modal_close);

        tracing::info!(
            grid = self.anchors.listing.is_some(),
            cart_total = total,
            "Storefront page loaded"
        );
    }

    fn run_routes(&mut self, target: NodeId, click: bool) {
        if !self.loaded {
            tracing::debug!(?target, "Event before load ignored");
            return;
        }
        let table = if click {
            &self.routes.click
        } else {
            &self.routes.change
        };
        let handlers: Vec<Handler<S>> = table
            .iter()
            .filter(|(marker, _)| self.matches(*marker, target))
            .map(|(_, handler)| *handler)
            .collect();

        for handler in handlers {
            handler(self, target);
        }
    }

    /// Whether `target` carries `marker` on this page.
    #[must_use]
    pub fn matches(&self, marker: Marker, target: NodeId) -> bool {
        let doc = &self.document;
        let grid = self.anchors.listing.map(|l| l.grid);
        let in_grid = |class: &str| {
            grid.is_some_and(|g| doc.has_class(target, class) && doc.contains(g, target))
        };
        match marker {
            Marker::AddToCart => in_grid(classes::ADD_TO_CART),
            Marker::ProductImage => in_grid(classes::IMAGE),
            Marker::ModalClose => self
                .anchors
                .modal
                .as_ref()
                .is_some_and(|m| m.is_close_control(doc, target)),
            Marker::ModalBackdrop => self
                .anchors
                .modal
                .as_ref()
                .is_some_and(|m| m.is_backdrop(target)),
            Marker::CategoryFilter => {
                self.anchors.listing.and_then(|l| l.category) == Some(target)
            }
            Marker::SortFilter => self.anchors.listing.and_then(|l| l.sort) == Some(target),
        }
    }

    /// The product id tagged on `target`, if it parses.
    fn target_product(&self, target: NodeId) -> Option<ProductId> {
        let raw = self.document.attr(target, DATA_ID)?;
        match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::debug!(raw, "Ignoring non-numeric product id");
                None
            }
        }
    }

    fn on_add_to_cart(page: &mut Self, target: NodeId) {
        let Some(id) = page.target_product(target) else {
            return;
        };
        if !page.state.catalog().contains(id) {
            tracing::debug!(%id, "Unknown product, not adding to cart");
            return;
        }
        absorb("add to cart", page.cart.add_to_cart(id, &mut page.document));
    }

    fn on_product_image(page: &mut Self, target: NodeId) {
        let Some(id) = page.target_product(target) else {
            return;
        };
        if let Some(modal) = page.anchors.modal.as_mut() {
            modal.open(&mut page.document, page.state.catalog(), id);
        }
    }

    fn on_modal_close(page: &mut Self, _target: NodeId) {
        if let Some(modal) = page.anchors.modal.as_mut() {
            modal.close(&mut page.document);
        }
    }

    fn on_filter_change(page: &mut Self, _target: NodeId) {
        if let Some(listing) = page.anchors.listing {
            listing.apply(&mut page.document, page.state.catalog());
        }
    }
}
