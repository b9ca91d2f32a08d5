// Rust guideline compliant 2026-10-19

//! Implementation of the `gear overdue` command.

use crate::OutputFormatter;
use chrono::{DateTime, Utc};
use gearloan_app::InventoryService;

/// Renders active loans past due at `at`, or at the current time.
pub fn execute(
    service: &InventoryService,
    at: Option<DateTime<Utc>>,
    formatter: &dyn OutputFormatter,
) -> String {
    let records = match at {
        Some(at) => service.overdue_at(at),
        None => service.overdue(),
    };
    formatter.format_records(&records)
}
