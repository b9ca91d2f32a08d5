// Rust guideline compliant 2026-10-19

//! Inventory service facade.
//!
//! `InventoryService` composes the catalog index and the lending ledger over
//! one shared item store. It is the entry point for every caller: the CLI,
//! an interactive session, or a future transport layer.

use crate::error::{AppError, Result};
use crate::ids::resolve_record_id;
use crate::time::{Clock, SystemClock};
use chrono::{DateTime, Duration, Utc};
use gearloan_core::{
    BorrowRecord, BorrowRequest, CatalogFilter, CatalogIndex, Config, History, ItemId, ItemStore,
    ItemView, LendingLedger, RecordId, Seed,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Receipt for a successful borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub record_id: RecordId,
    pub item_id: ItemId,
    pub item_name: String,
    pub borrower_id: String,
    pub borrower_name: String,
    pub borrow_time: DateTime<Utc>,
    pub expected_return_time: DateTime<Utc>,
}

/// Facade over the catalog and the ledger.
///
/// The service is `Send + Sync`; wrap it in an `Arc` to share it.
#[derive(Debug, Clone)]
pub struct InventoryService {
    catalog: CatalogIndex,
    ledger: LendingLedger,
    clock: Arc<dyn Clock>,
    max_loan: Option<Duration>,
}

impl InventoryService {
    /// Creates a service over `store` using the wall clock and no loan limit.
    pub fn new(store: ItemStore) -> Self {
        let store = Arc::new(store);
        Self {
            catalog: CatalogIndex::new(Arc::clone(&store)),
            ledger: LendingLedger::new(store),
            clock: Arc::new(SystemClock),
            max_loan: None,
        }
    }

    /// Validates a seed and creates a service over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed is inconsistent.
    pub fn from_seed(seed: Seed) -> Result<Self> {
        Ok(Self::new(seed.into_store()?))
    }

    /// Creates a service from configuration.
    ///
    /// Loads `catalog_path` when set, otherwise starts with an empty
    /// inventory, and applies `max_loan_days`.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed file cannot be read or is inconsistent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let service = match &config.catalog_path {
            Some(path) => Self::from_seed(Seed::load(path)?)?,
            None => Self::new(ItemStore::new(Vec::new())?),
        };
        Ok(service.with_max_loan_days(config.max_loan_days))
    }

    /// Replaces the clock used for returns and overdue checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the longest accepted loan. `None` removes the limit.
    #[must_use]
    pub fn with_max_loan_days(mut self, days: Option<u32>) -> Self {
        self.max_loan = days.map(|d| Duration::days(i64::from(d)));
        self
    }

    /// Catalog index backing this service.
    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// Ledger backing this service.
    pub fn ledger(&self) -> &LendingLedger {
        &self.ledger
    }

    /// Current time according to the service clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Lists items matching `filter` with their live status.
    pub fn search_catalog<'a>(
        &'a self,
        filter: &'a CatalogFilter,
    ) -> impl Iterator<Item = ItemView> + 'a {
        self.catalog.list(filter).map(ItemView::from)
    }

    /// Looks up one item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub fn item(&self, item_id: &ItemId) -> Result<ItemView> {
        Ok(self.catalog.get(item_id)?.into())
    }

    /// Category picker values, `"All"` first.
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// Borrows one unit of an item.
    ///
    /// Checks run in a fixed order: request fields and loan length, then item
    /// existence, then availability.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is malformed or longer than the loan limit (`InvalidRequest`)
    /// - The item does not exist (`NotFound`)
    /// - The item is retired, under maintenance, or fully borrowed (`ItemUnavailable`)
    pub fn submit_borrow(&self, item_id: &ItemId, request: &BorrowRequest) -> Result<Confirmation> {
        let result = self.try_borrow(item_id, request);
        if let Err(e) = &result {
            self.log_rejection("borrow", item_id.as_str(), e);
        }
        result
    }

    fn try_borrow(&self, item_id: &ItemId, request: &BorrowRequest) -> Result<Confirmation> {
        let request = request.normalized()?;

        if let Some(limit) = self.max_loan {
            if request.expected_return_time - request.borrow_time > limit {
                return Err(AppError::InvalidInput(format!(
                    "Loans are limited to {} days",
                    limit.num_days()
                )));
            }
        }

        let item = self.catalog.get(item_id)?;
        if item.retired {
            return Err(gearloan_core::Error::ItemUnavailable(format!("{} is retired", item_id)).into());
        }

        let record = self.ledger.borrow(item_id, &request)?;

        Ok(Confirmation {
            record_id: record.record_id,
            item_id: record.item_id,
            item_name: item.name,
            borrower_id: record.borrower_id,
            borrower_name: record.borrower_name,
            borrow_time: record.borrow_time,
            expected_return_time: record.expected_return_time,
        })
    }

    /// Looks up a borrower's records, oldest borrow first.
    ///
    /// Despite the name this only reads; use `return_item` to close a loan.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the borrower ID is blank.
    pub fn submit_return(&self, borrower_id: &str) -> Result<History> {
        let borrower_id = borrower_id.trim();
        if borrower_id.is_empty() {
            let err = AppError::InvalidInput("Please enter a borrower ID".to_string());
            self.log_rejection("history", borrower_id, &err);
            return Err(err);
        }
        Ok(self.ledger.history_for(borrower_id)?)
    }

    /// Returns the unit held by `record_id`, stamped with the clock's time.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record does not exist (`NotFound`)
    /// - The record was already returned (`AlreadyReturned`)
    pub fn return_item(&self, record_id: &RecordId) -> Result<BorrowRecord> {
        let result = self
            .ledger
            .return_item(record_id, self.clock.now())
            .map_err(AppError::from);
        if let Err(e) = &result {
            self.log_rejection("return", record_id.as_str(), e);
        }
        result
    }

    /// Expands a unique prefix into a full record ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AmbiguousId` when the prefix does not pick
    /// exactly one record.
    pub fn resolve_record_id(&self, partial: &str) -> Result<RecordId> {
        let known = self.ledger.record_ids()?;
        resolve_record_id(partial, &known)
    }

    /// Puts an item into or out of maintenance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub fn set_maintenance(&self, item_id: &ItemId, under_maintenance: bool) -> Result<ItemView> {
        Ok(self.ledger.set_maintenance(item_id, under_maintenance)?.into())
    }

    /// Withdraws an item from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub fn retire_item(&self, item_id: &ItemId) -> Result<ItemView> {
        Ok(self.ledger.retire(item_id)?.into())
    }

    /// Active loans past due at the clock's current time.
    pub fn overdue(&self) -> Vec<BorrowRecord> {
        self.ledger.overdue(self.clock.now())
    }

    /// Active loans past due at `at`.
    pub fn overdue_at(&self, at: DateTime<Utc>) -> Vec<BorrowRecord> {
        self.ledger.overdue(at)
    }

    /// Verifies that every item's availability matches its active records.
    ///
    /// # Errors
    ///
    /// Returns `Internal` naming the first broken item.
    pub fn check_invariants(&self) -> Result<()> {
        Ok(self.ledger.check_invariants()?)
    }

    fn log_rejection(&self, operation: &str, subject: &str, error: &AppError) {
        if error.is_internal() {
            tracing::error!(operation, subject, error = %error, "request failed");
        } else {
            tracing::warn!(operation, subject, code = ?error.code(), error = %error, "request rejected");
        }
    }
}
