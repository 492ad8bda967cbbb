//! End-to-end page scenarios driven through events.

#![allow(clippy::unwrap_used)]

use phytomed_core::{Catalog, ProductId};
use phytomed_storefront::config::{StorageBackend, StorefrontConfig};
use phytomed_storefront::dom::{Display, Document, ElementSpec, NodeId};
use phytomed_storefront::modal::{ModalState, markers};
use phytomed_storefront::page::{Event, Marker, Page};
use phytomed_storefront::render::{DATA_ID, classes};
use phytomed_storefront::state::AppState;
use phytomed_storefront::storage::{FileStore, KeyValueStore, MemoryStore};

/// A products page: header badge, both selectors and the grid.
fn products_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    let header = doc.append(body, ElementSpec::new("header"));
    doc.append(header, ElementSpec::new("span").class("cart-count").text("0"));
    doc.append(
        body,
        ElementSpec::new("select")
            .id("category-filter")
            .attr("value", "all"),
    );
    doc.append(
        body,
        ElementSpec::new("select").id("sort-filter").attr("value", "default"),
    );
    doc.append(body, ElementSpec::new("div").class("products-grid"));
    doc.append(body, ElementSpec::new("footer").class("cart-count"));
    doc
}

/// A page with only a cart badge, like the about page.
fn badge_only_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    doc.append(body, ElementSpec::new("span").class("cart-count"));
    doc
}

fn loaded<S: KeyValueStore>(doc: Document, storage: S) -> Page<S> {
    let mut page = Page::new(AppState::phytomed().unwrap(), doc, storage);
    page.dispatch(Event::Loaded);
    page
}

fn button_for<S: KeyValueStore>(page: &Page<S>, id: i32) -> NodeId {
    card_element(page, classes::ADD_TO_CART, id)
}

fn image_for<S: KeyValueStore>(page: &Page<S>, id: i32) -> NodeId {
    card_element(page, classes::IMAGE, id)
}

fn card_element<S: KeyValueStore>(page: &Page<S>, class: &str, id: i32) -> NodeId {
    let doc = page.document();
    doc.query_class_all(class)
        .into_iter()
        .find(|n| doc.attr(*n, DATA_ID) == Some(id.to_string().as_str()))
        .unwrap()
}

fn badges<S: KeyValueStore>(page: &Page<S>) -> Vec<String> {
    let doc = page.document();
    doc.query_class_all("cart-count")
        .into_iter()
        .map(|n| doc.text_content(n))
        .collect()
}

fn grid_ids<S: KeyValueStore>(page: &Page<S>) -> Vec<String> {
    let doc = page.document();
    doc.query_class_within(page.grid().unwrap(), classes::ADD_TO_CART)
        .into_iter()
        .filter_map(|n| doc.attr(n, DATA_ID).map(str::to_string))
        .collect()
}

fn modal_text<S: KeyValueStore>(page: &Page<S>, id: &str) -> String {
    let doc = page.document();
    doc.text_content(doc.element_by_id(id).unwrap())
}

fn select<S: KeyValueStore>(page: &mut Page<S>, id: &str, value: &str) {
    let control = page.document().element_by_id(id).unwrap();
    page.document_mut().set_value(control, value);
    page.dispatch(Event::Change { target: control });
}

#[test]
fn test_load_renders_full_catalog() {
    let page = loaded(products_page(), MemoryStore::new());

    assert!(page.is_loaded());
    assert_eq!(grid_ids(&page), vec!["1", "2", "3"]);
    assert_eq!(badges(&page), vec!["0", "0"]);
    assert_eq!(page.modal_state(), ModalState::Hidden);

    let doc = page.document();
    let modal = doc.element_by_id("product-modal").unwrap();
    assert_eq!(doc.display(modal), Display::None);
}

#[test]
fn test_load_registers_routes_for_present_features() {
    let page = loaded(products_page(), MemoryStore::new());
    assert_eq!(
        page.routes().click_markers().collect::<Vec<_>>(),
        vec![
            Marker::AddToCart,
            Marker::ProductImage,
            Marker::ModalClose,
            Marker::ModalBackdrop
        ]
    );
    assert_eq!(
        page.routes().change_markers().collect::<Vec<_>>(),
        vec![Marker::CategoryFilter, Marker::SortFilter]
    );

    let page = loaded(badge_only_page(), MemoryStore::new());
    assert_eq!(
        page.routes().click_markers().collect::<Vec<_>>(),
        vec![Marker::ModalClose, Marker::ModalBackdrop]
    );
    assert_eq!(page.routes().change_markers().count(), 0);
}

#[test]
fn test_load_twice_is_noop() {
    let mut page = loaded(products_page(), MemoryStore::new());
    let before = page.document().to_html(page.document().body());

    page.dispatch(Event::Loaded);

    assert_eq!(page.document().to_html(page.document().body()), before);
    assert_eq!(page.routes().click_markers().count(), 4);
}

#[test]
fn test_events_before_load_are_ignored() {
    let mut doc = products_page();
    let body = doc.body();
    let stray = doc.append(body, ElementSpec::new("button").class("add-to-cart").attr(DATA_ID, "1"));

    let mut page = Page::new(AppState::phytomed().unwrap(), doc, MemoryStore::new());
    page.dispatch(Event::Click { target: stray });

    assert!(page.cart().get_cart().is_empty());
    assert!(page.document().element_by_id("product-modal").is_none());
}

#[test]
fn test_add_to_cart_clicks_accumulate() {
    let mut page = loaded(products_page(), MemoryStore::new());

    for id in [2, 1, 2, 2] {
        let button = button_for(&page, id);
        page.dispatch(Event::Click { target: button });
    }

    let cart = page.cart().get_cart();
    assert_eq!(cart.total_quantity(), 4);
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity.get(), 3);
    assert_eq!(badges(&page), vec!["4", "4"]);
}

#[test]
fn test_click_outside_grid_button_does_nothing() {
    let mut page = loaded(products_page(), MemoryStore::new());
    let card = page.document().query_class(classes::CARD).unwrap();
    let title = page.document().query_class(classes::TITLE).unwrap();

    page.dispatch(Event::Click { target: card });
    page.dispatch(Event::Click { target: title });

    assert!(page.cart().get_cart().is_empty());
    assert_eq!(page.modal_state(), ModalState::Hidden);
}

#[test]
fn test_add_to_cart_outside_grid_is_ignored() {
    let mut doc = products_page();
    let body = doc.body();
    let outside = doc.append(
        body,
        ElementSpec::new("button").class("add-to-cart").attr(DATA_ID, "1"),
    );
    let mut page = loaded(doc, MemoryStore::new());

    page.dispatch(Event::Click { target: outside });
    assert!(page.cart().get_cart().is_empty());
}

#[test]
fn test_bad_product_ids_are_noops() {
    let mut page = loaded(products_page(), MemoryStore::new());
    let grid = page.grid().unwrap();

    for raw in ["abc", "", "99"] {
        let doc = page.document_mut();
        let button = doc.append(
            grid,
            ElementSpec::new("button").class("add-to-cart").attr(DATA_ID, raw),
        );
        let image = doc.append(
            grid,
            ElementSpec::new("img").class("product-image").attr(DATA_ID, raw),
        );
        page.dispatch(Event::Click { target: button });
        page.dispatch(Event::Click { target: image });
    }

    assert!(page.cart().get_cart().is_empty());
    assert_eq!(page.modal_state(), ModalState::Hidden);
    assert_eq!(badges(&page), vec!["0", "0"]);
}

#[test]
fn test_image_click_opens_modal() {
    let mut page = loaded(products_page(), MemoryStore::new());
    let image = image_for(&page, 1);

    page.dispatch(Event::Click { target: image });

    assert_eq!(page.modal_state(), ModalState::Visible(ProductId::new(1)));
    assert_eq!(modal_text(&page, markers::TITLE), "PhytoBlend Herbal Tea");
    assert_eq!(
        modal_text(&page, markers::USES),
        "Steep 1 teabag in hot water for 5-7 minutes. Drink 2-3 times daily for best results."
    );
    assert_eq!(
        modal_text(&page, markers::DESCRIPTION),
        "A soothing blend of premium medicinal herbs"
    );
    let doc = page.document();
    let modal = doc.element_by_id("product-modal").unwrap();
    assert_eq!(doc.display(modal), Display::Block);
}

#[test]
fn test_modal_close_control() {
    let mut page = loaded(products_page(), MemoryStore::new());
    let image = image_for(&page, 3);
    page.dispatch(Event::Click { target: image });

    let close = page.document().query_class(markers::CLOSE).unwrap();
    page.dispatch(Event::Click { target: close });

    assert_eq!(page.modal_state(), ModalState::Hidden);
    let doc = page.document();
    assert_eq!(
        doc.display(doc.element_by_id("product-modal").unwrap()),
        Display::None
    );
}

#[test]
fn test_modal_backdrop_click_closes() {
    let mut page = loaded(products_page(), MemoryStore::new());
    let image = image_for(&page, 2);
    page.dispatch(Event::Click { target: image });

    let backdrop = page.document().element_by_id("product-modal").unwrap();
    page.dispatch(Event::Click { target: backdrop });

    assert_eq!(page.modal_state(), ModalState::Hidden);
}

#[test]
fn test_modal_content_click_keeps_it_open() {
    let mut page = loaded(products_page(), MemoryStore::new());
    let image = image_for(&page, 2);
    page.dispatch(Event::Click { target: image });

    let doc = page.document();
    let targets = [
        doc.query_class(markers::CONTENT).unwrap(),
        doc.element_by_id(markers::TITLE).unwrap(),
        doc.element_by_id(markers::IMAGE).unwrap(),
    ];
    for target in targets {
        page.dispatch(Event::Click { target });
    }

    assert_eq!(page.modal_state(), ModalState::Visible(ProductId::new(2)));
}

#[test]
fn test_modal_works_without_grid() {
    let mut page = loaded(badge_only_page(), MemoryStore::new());
    assert!(page.grid().is_none());

    let backdrop = page.document().element_by_id("product-modal").unwrap();
    page.dispatch(Event::Click { target: backdrop });
    assert_eq!(page.modal_state(), ModalState::Hidden);
}

#[test]
fn test_existing_modal_is_reused() {
    let mut doc = products_page();
    let body = doc.body();
    doc.append(body, ElementSpec::new("div").id("product-modal").class("modal"));

    let page = loaded(doc, MemoryStore::new());
    let doc = page.document();
    let modals: Vec<_> = doc
        .descendants(doc.body())
        .filter(|n| doc.get(*n).and_then(|el| el.id()) == Some("product-modal"))
        .collect();
    assert_eq!(modals.len(), 1);
}

#[test]
fn test_filter_and_sort_changes() {
    let mut page = loaded(products_page(), MemoryStore::new());

    select(&mut page, "sort-filter", "price-high");
    assert_eq!(grid_ids(&page), vec!["2", "3", "1"]);

    select(&mut page, "sort-filter", "price-low");
    assert_eq!(grid_ids(&page), vec!["1", "2", "3"]);

    select(&mut page, "category-filter", "Skin Care");
    assert_eq!(grid_ids(&page), vec!["3"]);

    select(&mut page, "category-filter", "Tinctures");
    assert!(grid_ids(&page).is_empty());

    select(&mut page, "category-filter", "all");
    select(&mut page, "sort-filter", "default");
    assert_eq!(grid_ids(&page), vec!["1", "2", "3"]);
}

#[test]
fn test_rerendered_grid_still_dispatches() {
    let mut page = loaded(products_page(), MemoryStore::new());
    select(&mut page, "sort-filter", "price-high");

    let button = button_for(&page, 1);
    page.dispatch(Event::Click { target: button });
    let image = image_for(&page, 2);
    page.dispatch(Event::Click { target: image });

    assert_eq!(page.cart().get_cart().total_quantity(), 1);
    assert_eq!(page.modal_state(), ModalState::Visible(ProductId::new(2)));
}

#[test]
fn test_change_on_other_control_is_ignored() {
    let mut doc = products_page();
    let body = doc.body();
    doc.append(body, ElementSpec::new("select").id("page-size").attr("value", "10"));
    let mut page = loaded(doc, MemoryStore::new());

    select(&mut page, "page-size", "price-high");
    assert_eq!(grid_ids(&page), vec!["1", "2", "3"]);
}

#[test]
fn test_sort_only_page() {
    let mut doc = Document::new();
    let body = doc.body();
    doc.append(body, ElementSpec::new("select").id("sort-filter"));
    doc.append(body, ElementSpec::new("div").class("products-grid"));
    let mut page = loaded(doc, MemoryStore::new());

    select(&mut page, "sort-filter", "price-high");
    assert_eq!(grid_ids(&page), vec!["2", "3", "1"]);
}

#[test]
fn test_badge_only_page_shows_stored_total() {
    let mut storage = MemoryStore::new();
    storage.set("cart", r#"[{"id":1,"qty":2},{"id":3,"qty":5}]"#).unwrap();

    let page = loaded(badge_only_page(), storage);
    assert_eq!(badges(&page), vec!["7"]);
}

#[test]
fn test_corrupt_storage_shows_zero() {
    let mut storage = MemoryStore::new();
    storage.set("cart", "[{\"id\":1,").unwrap();

    let mut page = loaded(products_page(), storage);
    assert_eq!(badges(&page), vec!["0", "0"]);

    let button = button_for(&page, 1);
    page.dispatch(Event::Click { target: button });
    assert_eq!(badges(&page), vec!["1", "1"]);
}

#[test]
fn test_zero_quantity_entry_does_not_wipe_cart() {
    let mut storage = MemoryStore::new();
    storage
        .set("cart", r#"[{"id":1,"qty":5},{"id":2,"qty":0}]"#)
        .unwrap();

    let mut page = loaded(products_page(), storage);
    assert_eq!(badges(&page), vec!["5", "5"]);

    let button = button_for(&page, 3);
    page.dispatch(Event::Click { target: button });

    assert_eq!(badges(&page), vec!["6", "6"]);
    let cart = page.cart().get_cart();
    assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity.get(), 5);
    assert_eq!(cart.get(ProductId::new(3)).unwrap().quantity.get(), 1);
    assert!(cart.get(ProductId::new(2)).is_none());
}

#[test]
fn test_cart_survives_page_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");

    let mut first = loaded(products_page(), FileStore::new(&path));
    for id in [1, 3, 3] {
        let button = button_for(&first, id);
        first.dispatch(Event::Click { target: button });
    }

    let second = loaded(badge_only_page(), FileStore::new(&path));
    assert_eq!(badges(&second), vec!["3"]);
    assert_eq!(second.cart().get_cart(), first.cart().get_cart());
}

#[test]
fn test_open_from_config_with_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let config = StorefrontConfig {
        storage_key: "phytomed-cart".to_string(),
        storage: StorageBackend::File { path: path.clone() },
        ..StorefrontConfig::default()
    };
    let state = AppState::new(config, Catalog::phytomed().unwrap()).unwrap();

    let mut page = Page::open(state, products_page()).unwrap();
    page.dispatch(Event::Loaded);
    let button = button_for(&page, 2);
    page.dispatch(Event::Click { target: button });

    let raw = FileStore::new(&path).get("phytomed-cart").unwrap();
    assert_eq!(raw.as_deref(), Some(r#"[{"id":2,"qty":1}]"#));
}

#[test]
fn test_custom_selectors() {
    let config = StorefrontConfig::from_json(
        r#"{"selectors": {"products_grid": "catalog", "cart_count": "badge", "modal": "details"}}"#,
    )
    .unwrap();
    let state = AppState::new(config, Catalog::phytomed().unwrap()).unwrap();

    let mut doc = Document::new();
    let body = doc.body();
    doc.append(body, ElementSpec::new("div").class("catalog"));
    doc.append(body, ElementSpec::new("span").class("badge"));

    let mut page = Page::new(state, doc, MemoryStore::new());
    page.dispatch(Event::Loaded);

    assert!(page.document().element_by_id("details").is_some());
    let button = button_for(&page, 1);
    page.dispatch(Event::Click { target: button });

    let doc = page.document();
    assert_eq!(doc.text_content(doc.query_class("badge").unwrap()), "1");
}
