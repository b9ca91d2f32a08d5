// Rust guideline compliant 2026-10-19

//! Shared application services for Gearloan.
//!
//! This crate provides the `InventoryService` facade that callers use, plus
//! the clock abstraction, record ID resolution, stable error codes, and
//! standardized response envelopes.

pub mod error;
pub mod ids;
pub mod response;
pub mod service;
pub mod time;

pub use error::{AppError, ErrorCode, Result};
pub use ids::resolve_record_id;
pub use response::{ErrorEnvelope, SuccessEnvelope};
pub use service::{Confirmation, InventoryService};
pub use time::{Clock, FixedClock, SystemClock};
