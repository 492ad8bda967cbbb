//! Product detail modal.
//!
//! The overlay is built lazily and appended to the body once. It has two
//! states: hidden (initial) and visible for one product. It closes from the
//! close control or from a click on the dimmed backdrop itself; clicks inside
//! the content box leave it open.

use phytomed_core::{Catalog, ProductId};

use crate::dom::{Display, Document, ElementSpec, NodeId};

/// Marker classes and ids inside the overlay.
pub mod markers {
    pub const MODAL_CLASS: &str = "modal";
    pub const CONTENT: &str = "modal-content";
    pub const CLOSE: &str = "modal-close";
    pub const IMAGE: &str = "modal-image";
    pub const TITLE: &str = "modal-title";
    pub const DESCRIPTION: &str = "modal-description";
    pub const CURES: &str = "modal-cures";
    pub const USES: &str = "modal-uses";
}

/// Attribute on the overlay root recording which product is shown.
const PRODUCT_ATTR: &str = "data-product-id";

/// Visibility of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Visible(ProductId),
}

/// Controller for the product detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    root: NodeId,
    state: ModalState,
}

impl Modal {
    /// Return the overlay with id `modal_id`, building it if the page does
    /// not have one yet.
    ///
    /// Calling this again finds the existing overlay instead of adding a
    /// second one.
    pub fn ensure(document: &mut Document, modal_id: &str) -> Self {
        if let Some(root) = document.element_by_id(modal_id) {
            let state = Self::state_from_document(document, root);
            return Self { root, state };
        }

        let body = document.body();
        let root = document.append(
            body,
            ElementSpec::new("div")
                .id(modal_id)
                .class(markers::MODAL_CLASS),
        );
        document.set_display(root, Display::None);

        let content = document.append(root, ElementSpec::new("div").class(markers::CONTENT));
        document.append(
            content,
            ElementSpec::new("span").class(markers::CLOSE).text("\u{00d7}"),
        );
        let modal_body = document.append(content, ElementSpec::new("div").class("modal-body"));
        document.append(
            modal_body,
            ElementSpec::new("img")
                .id(markers::IMAGE)
                .attr("src", "")
                .attr("alt", ""),
        );

        let details = document.append(modal_body, ElementSpec::new("div").class("modal-details"));
        document.append(details, ElementSpec::new("h2").id(markers::TITLE));
        document.append(details, ElementSpec::new("p").id(markers::DESCRIPTION));
        for (heading, field) in [
            ("What it cures:", markers::CURES),
            ("How to use:", markers::USES),
        ] {
            let section = document.append(details, ElementSpec::new("div").class("modal-section"));
            document.append(section, ElementSpec::new("h3").text(heading));
            document.append(section, ElementSpec::new("p").id(field));
        }

        tracing::debug!(modal_id, "Created product modal");
        Self {
            root,
            state: ModalState::Hidden,
        }
    }

    fn state_from_document(document: &Document, root: NodeId) -> ModalState {
        if document.display(root) != Display::Block {
            return ModalState::Hidden;
        }
        document
            .attr(root, PRODUCT_ATTR)
            .and_then(|id| id.parse().ok())
            .map_or(ModalState::Hidden, ModalState::Visible)
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub const fn state(&self) -> ModalState {
        self.state
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self.state, ModalState::Visible(_))
    }

    /// Show details for `id`.
    ///
    /// Returns `false` and changes nothing when the catalog has no such
    /// product.
    pub fn open(&mut self, document: &mut Document, catalog: &Catalog, id: ProductId) -> bool {
        let Some(product) = catalog.find(id) else {
            tracing::debug!(%id, "No product for modal, staying closed");
            return false;
        };

        if let Some(image) = document.element_by_id(markers::IMAGE) {
            document.set_attr(image, "src", &product.image);
            document.set_attr(image, "alt", &product.title);
        }
        for (field, text) in [
            (markers::TITLE, &product.title),
            (markers::DESCRIPTION, &product.description),
            (markers::CURES, &product.cures),
            (markers::USES, &product.uses),
        ] {
            if let Some(node) = document.element_by_id(field) {
                document.set_text(node, text.as_str());
            }
        }

        document.set_attr(self.root, PRODUCT_ATTR, id.to_string());
        document.set_display(self.root, Display::Block);
        self.state = ModalState::Visible(id);
        true
    }

    /// Hide the overlay. Closing a hidden modal is a no-op.
    pub fn close(&mut self, document: &mut Document) {
        if self.state == ModalState::Hidden {
            return;
        }
        document.set_display(self.root, Display::None);
        self.state = ModalState::Hidden;
    }

    /// Whether a click on `target` hits the close control.
    #[must_use]
    pub fn is_close_control(&self, document: &Document, target: NodeId) -> bool {
        document.has_class(target, markers::CLOSE) && document.contains(self.root, target)
    }

    /// Whether a click on `target` hits the backdrop, i.e. the overlay root
    /// itself rather than anything inside the content box.
    #[must_use]
    pub fn is_backdrop(&self, target: NodeId) -> bool {
        target == self.root
    }
}
