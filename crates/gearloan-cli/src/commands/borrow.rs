// Rust guideline compliant 2026-10-19

//! Implementation of the `gear borrow` command.

use crate::OutputFormatter;
use chrono::{DateTime, Utc};
use gearloan_app::{InventoryService, Result};
use gearloan_core::{BorrowRequest, ItemId};

/// Borrows one unit of an item and renders the confirmation.
///
/// # Errors
///
/// Returns an error if:
/// - A field is blank or the dates are not in order (`InvalidRequest`)
/// - The item does not exist (`NotFound`)
/// - No unit can be lent right now (`ItemUnavailable`)
#[allow(clippy::too_many_arguments)]
pub fn execute(
    service: &InventoryService,
    item_id: &str,
    borrower_id: String,
    borrower_name: String,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
    purpose: Option<String>,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let request = BorrowRequest {
        borrower_id,
        borrower_name,
        borrow_time: from,
        expected_return_time: until,
        purpose,
    };

    let confirmation = service.submit_borrow(&ItemId::from(item_id.trim()), &request)?;
    Ok(formatter.format_confirmation(&confirmation))
}
