//! Filter and sort controller for the product grid.

use phytomed_core::{Catalog, CategoryFilter, ListingQuery, SortOrder};

use crate::config::Selectors;
use crate::dom::{Document, NodeId};
use crate::render::render_products_grid;

/// The grid and the optional selector controls driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingControls {
    pub grid: NodeId,
    pub category: Option<NodeId>,
    pub sort: Option<NodeId>,
}

impl ListingControls {
    /// Locate the grid and selector controls on the page.
    ///
    /// Returns `None` when the page has no grid, in which case filtering is
    /// not applicable.
    #[must_use]
    pub fn locate(document: &Document, selectors: &Selectors) -> Option<Self> {
        let grid = document.query_class(&selectors.products_grid)?;
        Some(Self {
            grid,
            category: document.element_by_id(&selectors.category_filter),
            sort: document.element_by_id(&selectors.sort_filter),
        })
    }

    /// Build the query from the controls' current values.
    #[must_use]
    pub fn query(&self, document: &Document) -> ListingQuery {
        let value = |control: Option<NodeId>| control.and_then(|n| document.value(n));
        ListingQuery::new(
            CategoryFilter::from_control(value(self.category)),
            SortOrder::from_control(value(self.sort)),
        )
    }

    /// Recompute the visible products and re-render the grid.
    ///
    /// Returns the number of products shown.
    pub fn apply(&self, document: &mut Document, catalog: &Catalog) -> usize {
        let query = self.query(document);
        let list = query.apply(catalog);
        tracing::debug!(?query, shown = list.len(), "Applying listing filters");
        render_products_grid(document, self.grid, &list);
        list.len()
    }
}
