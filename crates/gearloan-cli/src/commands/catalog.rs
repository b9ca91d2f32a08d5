// Rust guideline compliant 2026-10-19

//! Implementation of the `gear catalog`, `gear categories` and `gear show`
//! commands.

use crate::OutputFormatter;
use gearloan_app::{InventoryService, Result};
use gearloan_core::{CatalogFilter, ItemId, ItemView};

/// Renders the catalog listing for a search text and category.
pub fn list(
    service: &InventoryService,
    search: Option<String>,
    category: String,
    formatter: &dyn OutputFormatter,
) -> String {
    let filter = CatalogFilter::new()
        .search(search.unwrap_or_default())
        .category(category);
    let items: Vec<ItemView> = service.search_catalog(&filter).collect();
    tracing::debug!(?filter, matches = items.len(), "catalog listed");
    formatter.format_items(&items)
}

/// Renders the category picker values.
pub fn categories(service: &InventoryService, formatter: &dyn OutputFormatter) -> String {
    formatter.format_categories(&service.categories())
}

/// Renders one item with its active loans.
///
/// # Errors
///
/// Returns `NotFound` if the item does not exist.
pub fn show(
    service: &InventoryService,
    item_id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let item_id = ItemId::from(item_id.trim());
    let item = service.item(&item_id)?;
    let active = service.ledger().active_for(&item_id)?;
    Ok(formatter.format_item(&item, &active))
}
