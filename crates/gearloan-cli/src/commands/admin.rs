// Rust guideline compliant 2026-10-19

//! Administrative commands: `gear maintenance`, `gear retire` and `gear check`.

use crate::OutputFormatter;
use gearloan_app::{InventoryService, Result};
use gearloan_core::ItemId;

/// Sets or clears the maintenance override and renders the item.
///
/// # Errors
///
/// Returns `NotFound` if the item does not exist.
pub fn maintenance(
    service: &InventoryService,
    item_id: &str,
    on: bool,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let item_id = ItemId::from(item_id.trim());
    let item = service.set_maintenance(&item_id, on)?;
    let active = service.ledger().active_for(&item_id)?;
    Ok(formatter.format_item(&item, &active))
}

/// Retires an item and renders it.
///
/// # Errors
///
/// Returns `NotFound` if the item does not exist.
pub fn retire(
    service: &InventoryService,
    item_id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let item_id = ItemId::from(item_id.trim());
    let item = service.retire_item(&item_id)?;
    let active = service.ledger().active_for(&item_id)?;
    Ok(formatter.format_item(&item, &active))
}

/// Runs the invariant check.
///
/// # Errors
///
/// Returns an internal error if an item's
/// quantities disagree with its records.
pub fn check(service: &InventoryService, formatter: &dyn OutputFormatter) -> Result<String> {
    service.check_invariants()?;
    Ok(formatter.format_message("Inventory is consistent"))
}
