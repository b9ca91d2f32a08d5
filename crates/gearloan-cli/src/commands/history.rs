// Rust guideline compliant 2026-10-19

//! Implementation of the `gear history` command.

use crate::OutputFormatter;
use gearloan_app::{InventoryService, Result};
use gearloan_core::BorrowRecord;

/// Renders every record of a borrower, oldest borrow first.
///
/// # Errors
///
/// Returns `InvalidRequest` if the borrower ID is blank.
pub fn execute(
    service: &InventoryService,
    borrower_id: &str,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let records: Vec<BorrowRecord> = service.submit_return(borrower_id)?.collect();
    Ok(formatter.format_records(&records))
}
