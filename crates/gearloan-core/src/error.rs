// Rust guideline compliant 2026-10-19

//! Error types for the Gearloan core library.

use thiserror::Error;

/// Result type alias for Gearloan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Gearloan operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown item or record identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The item has no free units, is under maintenance, or is retired.
    #[error("Item unavailable: {0}")]
    ItemUnavailable(String),

    /// Malformed or missing required fields, or non-chronological dates.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The record was already returned.
    #[error("Record already returned: {0}")]
    AlreadyReturned(String),

    /// Ambiguous partial record ID.
    #[error("Ambiguous ID: {0} matches {1:?}")]
    AmbiguousId(String, Vec<String>),

    /// Internal consistency breach. Never caused by caller input.
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// Configuration file or environment value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn poisoned(what: &str) -> Self {
        Self::InternalInvariantViolation(format!("{what} lock poisoned"))
    }
}
