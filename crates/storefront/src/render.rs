//! Product grid rendering.

use phytomed_core::{Price, Product};

use crate::dom::{Document, ElementSpec, NodeId};

/// Marker classes on rendered cards.
pub mod classes {
    pub const CARD: &str = "product-card";
    pub const IMAGE: &str = "product-image";
    pub const INFO: &str = "product-info";
    pub const TITLE: &str = "product-title";
    pub const PRICE: &str = "product-price";
    pub const ADD_TO_CART: &str = "add-to-cart";
}

/// Attribute carrying the product id on clickable card elements.
pub const DATA_ID: &str = "data-id";

/// Format a price for display, e.g. `$15.00`.
#[must_use]
pub fn format_price(price: &Price) -> String {
    price.display()
}

/// Replace the contents of `container` with one card per product, in order.
///
/// Rendering the same list twice produces identical markup.
pub fn render_products_grid(document: &mut Document, container: NodeId, products: &[&Product]) {
    document.clear_children(container);
    for product in products {
        render_card(document, container, product);
    }
    tracing::debug!(count = products.len(), "Rendered product grid");
}

fn render_card(document: &mut Document, container: NodeId, product: &Product) -> NodeId {
    let id = product.id.to_string();

    let card = document.append(container, ElementSpec::new("div").class(classes::CARD));
    document.append(
        card,
        ElementSpec::new("img")
            .class(classes::IMAGE)
            .attr("src", &product.image)
            .attr("alt", &product.title)
            .attr(DATA_ID, &id)
            .attr("style", "cursor: pointer;"),
    );

    let info = document.append(card, ElementSpec::new("div").class(classes::INFO));
    document.append(
        info,
        ElementSpec::new("div")
            .class(classes::TITLE)
            .text(&product.title),
    );
    document.append(
        info,
        ElementSpec::new("div")
            .class(classes::PRICE)
            .text(format_price(&product.price)),
    );
    document.append(
        info,
        ElementSpec::new("button")
            .class(classes::ADD_TO_CART)
            .attr(DATA_ID, id)
            .text("Add to Cart"),
    );

    card
}
