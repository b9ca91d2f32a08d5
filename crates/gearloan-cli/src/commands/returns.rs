// Rust guideline compliant 2026-10-19

//! Implementation of the `gear return` command.

use crate::OutputFormatter;
use gearloan_app::{InventoryService, Result};

/// Returns the unit held by a record and renders the closed record.
///
/// The record ID may be any unique prefix, with or without `br-`.
///
/// # Errors
///
/// Returns an error if:
/// - The prefix matches no record (`NotFound`) or several (`AmbiguousId`)
/// - The record was already returned (`AlreadyReturned`)
pub fn execute(
    service: &InventoryService,
    record_id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let record_id = service.resolve_record_id(record_id)?;
    let record = service.return_item(&record_id)?;
    Ok(formatter.format_record(&record))
}
