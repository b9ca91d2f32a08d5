// Rust guideline compliant 2026-10-19

//! ID resolution helpers for Gearloan.

use crate::error::Result;
use gearloan_core::{identity, RecordId};

/// Resolves a partial record ID to its canonical full ID.
///
/// # Arguments
///
/// * `partial` - Partial or full record ID, with or without the `br-` prefix
/// * `known` - Every record ID the ledger holds
///
/// # Returns
///
/// The canonical record ID.
///
/// # Errors
///
/// Returns an error if the partial ID is blank, ambiguous, or not found.
pub fn resolve_record_id(partial: &str, known: &[RecordId]) -> Result<RecordId> {
    Ok(identity::resolve_partial_id(partial, known)?)
}
