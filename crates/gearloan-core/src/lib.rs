// Rust guideline compliant 2026-10-19

//! Gearloan Core Library
//!
//! This crate provides the inventory and lending state manager behind the
//! Gearloan equipment lending system:
//! - Data models (EquipmentItem, BorrowRecord, derived ItemStatus)
//! - Shared item store with per-item locking
//! - Catalog index with free-text and category filtering
//! - Lending ledger (borrow, return, history, invariant checks)
//! - Record FSM and hash-based record IDs
//! - Seed loading, configuration, and error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod fsm;
pub mod identity;
pub mod ledger;
pub mod models;
pub mod seed;
pub mod store;

pub use catalog::{CatalogFilter, CatalogIndex, Listing, ALL_CATEGORIES};
pub use config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use ledger::{History, LendingLedger};
pub use models::{
    BorrowRecord, BorrowRequest, EquipmentItem, ItemId, ItemStatus, ItemView, RecordId,
    RecordState,
};
pub use seed::{Seed, SeedItem, SeedRecord};
pub use store::ItemStore;
