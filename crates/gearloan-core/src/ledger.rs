// Rust guideline compliant 2026-10-19

//! Lending ledger: the sole mutator of item availability.
//!
//! Every borrow and return runs under the owning item's write lock, so the
//! quantity change and the record change land together or not at all.
//! Different items never contend.

use crate::store::{check_slot, ItemSlot, ItemStore, SlotState};
use crate::{
    BorrowRecord, BorrowRequest, EquipmentItem, Error, ItemId, ItemStatus, RecordId, RecordState,
    Result,
};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::sync::Arc;

/// Whole-inventory scans switch to rayon above this many items.
const PARALLEL_THRESHOLD: usize = 1_000;

/// Borrower history in ascending borrow time.
pub type History = std::vec::IntoIter<BorrowRecord>;

/// Authoritative store of borrow records.
#[derive(Debug, Clone)]
pub struct LendingLedger {
    store: Arc<ItemStore>,
}

impl LendingLedger {
    /// Creates a ledger over a shared store.
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }

    /// Lends one unit of an item.
    ///
    /// # Arguments
    ///
    /// * `item_id` - Item to borrow
    /// * `request` - Borrower and loan window
    ///
    /// # Returns
    ///
    /// The new `Active` record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is missing fields or has non-chronological dates (`InvalidRequest`)
    /// - The item does not exist (`NotFound`)
    /// - The item has no free unit, is under maintenance, or is retired (`ItemUnavailable`)
    pub fn borrow(&self, item_id: &ItemId, request: &BorrowRequest) -> Result<BorrowRecord> {
        let request = request.normalized()?;
        let slot = self.store.slot(item_id)?;
        let mut state = slot.write()?;

        if state.item.retired {
            return Err(Error::ItemUnavailable(format!("{} is retired", item_id)));
        }

        match state.item.status() {
            ItemStatus::Available => {}
            ItemStatus::FullyBorrowed => {
                return Err(Error::ItemUnavailable(format!(
                    "{} has no units left",
                    item_id
                )));
            }
            ItemStatus::UnderMaintenance => {
                return Err(Error::ItemUnavailable(format!(
                    "{} is under maintenance",
                    item_id
                )));
            }
        }

        let mut record = BorrowRecord::active(RecordId::new(String::new()), item_id.clone(), request);
        self.store.assign_record_id(&mut record)?;

        state.item.available_quantity -= 1;
        state.records.push(record.clone());

        tracing::info!(
            record_id = %record.record_id,
            item_id = %item_id,
            borrower_id = %record.borrower_id,
            available = state.item.available_quantity,
            "item borrowed"
        );

        Ok(record)
    }

    /// Marks a record returned and puts its unit back on the shelf.
    ///
    /// # Arguments
    ///
    /// * `record_id` - Record to close
    /// * `returned_at` - Actual return time
    ///
    /// # Returns
    ///
    /// The record in its `Returned` state.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record does not exist (`NotFound`)
    /// - The record was already returned (`AlreadyReturned`)
    /// - The item would exceed its total quantity (`InternalInvariantViolation`)
    pub fn return_item(
        &self,
        record_id: &RecordId,
        returned_at: DateTime<Utc>,
    ) -> Result<BorrowRecord> {
        let item_id = self.store.locate(record_id)?;
        let slot = self.store.slot(&item_id).map_err(|_| {
            Error::InternalInvariantViolation(format!(
                "record {} points at missing item {}",
                record_id, item_id
            ))
        })?;
        let mut state = slot.write()?;
        let SlotState { item, records } = &mut *state;

        let record = records
            .iter_mut()
            .find(|r| &r.record_id == record_id)
            .ok_or_else(|| {
                Error::InternalInvariantViolation(format!(
                    "record {} indexed under {} but missing from it",
                    record_id, item_id
                ))
            })?;

        record.state.can_transition_to(RecordState::Returned, record_id)?;

        if item.available_quantity >= item.total_quantity {
            tracing::error!(
                record_id = %record_id,
                item_id = %item_id,
                available = item.available_quantity,
                total = item.total_quantity,
                "return would exceed total quantity"
            );
            return Err(Error::InternalInvariantViolation(format!(
                "returning {} would push {} above its total of {}",
                record_id, item_id, item.total_quantity
            )));
        }

        item.available_quantity += 1;
        record.state = RecordState::Returned;
        // A loan handed back before its start closes at the start time.
        record.actual_return_time = Some(returned_at.max(record.borrow_time));

        tracing::info!(
            record_id = %record_id,
            item_id = %item_id,
            borrower_id = %record.borrower_id,
            available = item.available_quantity,
            "item returned"
        );

        Ok(record.clone())
    }

    /// Lists every record of a borrower, active and returned.
    ///
    /// Records are ordered by borrow time, ties broken by record ID. A
    /// borrower without records gets an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariantViolation` if the record index is unusable.
    pub fn history_for(&self, borrower_id: &str) -> Result<History> {
        let borrower_id = borrower_id.trim();
        let mut history = Vec::new();

        for (record_id, item_id) in self.store.records_of(borrower_id)? {
            let slot = self.store.slot(&item_id)?;
            let state = slot.read();
            if let Some(record) = state.records.iter().find(|r| r.record_id == record_id) {
                history.push(record.clone());
            }
        }

        history.sort_by(|a, b| {
            a.borrow_time
                .cmp(&b.borrow_time)
                .then_with(|| a.record_id.cmp(&b.record_id))
        });

        tracing::debug!(borrower_id, records = history.len(), "history lookup");
        Ok(history.into_iter())
    }

    /// Returns a snapshot of one record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist.
    pub fn record(&self, record_id: &RecordId) -> Result<BorrowRecord> {
        let item_id = self.store.locate(record_id)?;
        let slot = self.store.slot(&item_id)?;
        let state = slot.read();
        state
            .records
            .iter()
            .find(|r| &r.record_id == record_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("record {}", record_id)))
    }

    /// Every known record ID, for partial ID resolution.
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariantViolation` if the record index is unusable.
    pub fn record_ids(&self) -> Result<Vec<RecordId>> {
        self.store.record_ids()
    }

    /// Active loans of one item, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub fn active_for(&self, item_id: &ItemId) -> Result<Vec<BorrowRecord>> {
        let slot = self.store.slot(item_id)?;
        let state = slot.read();
        let mut active: Vec<BorrowRecord> =
            state.records.iter().filter(|r| r.is_active()).cloned().collect();
        active.sort_by(|a, b| a.borrow_time.cmp(&b.borrow_time));
        Ok(active)
    }

    /// Active loans whose expected return time is before `at`, most overdue
    /// first.
    pub fn overdue(&self, at: DateTime<Utc>) -> Vec<BorrowRecord> {
        let overdue_in = |slot: &ItemSlot| -> Vec<BorrowRecord> {
            slot.read()
                .records
                .iter()
                .filter(|r| r.is_overdue_at(at))
                .cloned()
                .collect()
        };

        let mut overdue: Vec<BorrowRecord> = if self.store.len() >= PARALLEL_THRESHOLD {
            self.store.par_slots().flat_map_iter(overdue_in).collect()
        } else {
            self.store.slots().flat_map(overdue_in).collect()
        };

        overdue.sort_by(|a, b| {
            a.expected_return_time
                .cmp(&b.expected_return_time)
                .then_with(|| a.record_id.cmp(&b.record_id))
        });
        overdue
    }

    /// Verifies `total - available == active records` for every item.
    ///
    /// # Errors
    ///
    /// Returns `InternalInvariantViolation` naming the first broken item in
    /// ID order.
    pub fn check_invariants(&self) -> Result<()> {
        let check = |slot: &ItemSlot| check_slot(&slot.read());

        let results: Vec<Result<()>> = if self.store.len() >= PARALLEL_THRESHOLD {
            self.store.par_slots().map(check).collect()
        } else {
            self.store.slots().map(check).collect()
        };

        for result in results {
            if let Err(err) = result {
                tracing::error!(error = %err, "inventory invariant broken");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Sets or clears the maintenance override of an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub fn set_maintenance(&self, item_id: &ItemId, under_maintenance: bool) -> Result<EquipmentItem> {
        let slot = self.store.slot(item_id)?;
        let mut state = slot.write()?;
        state.item.under_maintenance = under_maintenance;
        tracing::info!(item_id = %item_id, under_maintenance, "maintenance flag changed");
        Ok(state.item.clone())
    }

    /// Soft-retires an item. Existing loans can still be returned.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist.
    pub fn retire(&self, item_id: &ItemId) -> Result<EquipmentItem> {
        let slot = self.store.slot(item_id)?;
        let mut state = slot.write()?;
        state.item.retired = true;
        tracing::info!(item_id = %item_id, outstanding = state.active_count(), "item retired");
        Ok(state.item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 20, hour, 0, 0).unwrap()
    }

    fn request(borrower: &str, hour: u32) -> BorrowRequest {
        BorrowRequest {
            borrower_id: borrower.to_string(),
            borrower_name: "Wu".to_string(),
            borrow_time: at(hour),
            expected_return_time: at(hour) + Duration::hours(2),
            purpose: Some("Animation course".to_string()),
        }
    }

    fn ledger(total: u32) -> LendingLedger {
        let items = vec![EquipmentItem::new("EQ002", "Wacom Intuos Pro", "Tablet", total)];
        LendingLedger::new(Arc::new(ItemStore::new(items).unwrap()))
    }

    fn available(ledger: &LendingLedger) -> u32 {
        ledger
            .store
            .slot(&ItemId::from("EQ002"))
            .unwrap()
            .read()
            .item
            .available_quantity
    }

    #[test]
    fn test_borrow_decrements_and_creates_active_record() {
        let ledger = ledger(2);
        let record = ledger.borrow(&ItemId::from("EQ002"), &request("984106503", 10)).unwrap();

        assert_eq!(record.state, RecordState::Active);
        assert_eq!(record.purpose.as_deref(), Some("Animation course"));
        assert!(record.record_id.as_str().starts_with("br-"));
        assert_eq!(available(&ledger), 1);
        ledger.check_invariants().unwrap();
    }

    #[test]
    fn test_borrow_at_zero_fails_without_record() {
        let ledger = ledger(1);
        let item = ItemId::from("EQ002");
        ledger.borrow(&item, &request("a", 10)).unwrap();

        let err = ledger.borrow(&item, &request("b", 11)).unwrap_err();
        assert!(matches!(err, Error::ItemUnavailable(_)));
        assert_eq!(ledger.history_for("b").unwrap().count(), 0);
        assert_eq!(available(&ledger), 0);
    }

    #[test]
    fn test_borrow_validation_order() {
        let ledger = ledger(1);
        let mut bad = request("", 10);
        bad.borrower_name = String::new();

        assert!(matches!(
            ledger.borrow(&ItemId::from("EQ404"), &bad),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            ledger.borrow(&ItemId::from("EQ404"), &request("a", 10)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_maintenance_and_retired_block_borrowing() {
        let ledger = ledger(3);
        let item = ItemId::from("EQ002");

        ledger.set_maintenance(&item, true).unwrap();
        assert!(matches!(
            ledger.borrow(&item, &request("a", 10)),
            Err(Error::ItemUnavailable(_))
        ));

        ledger.set_maintenance(&item, false).unwrap();
        let record = ledger.borrow(&item, &request("a", 10)).unwrap();

        ledger.retire(&item).unwrap();
        assert!(matches!(
            ledger.borrow(&item, &request("b", 11)),
            Err(Error::ItemUnavailable(_))
        ));

        ledger.return_item(&record.record_id, at(12)).unwrap();
        assert_eq!(available(&ledger), 3);
    }

    #[test]
    fn test_double_return_rejected() {
        let ledger = ledger(1);
        let record = ledger.borrow(&ItemId::from("EQ002"), &request("a", 10)).unwrap();

        let returned = ledger.return_item(&record.record_id, at(11)).unwrap();
        assert_eq!(returned.state, RecordState::Returned);
        assert_eq!(returned.actual_return_time, Some(at(11)));

        let err = ledger.return_item(&record.record_id, at(12)).unwrap_err();
        assert!(matches!(err, Error::AlreadyReturned(_)));
        assert_eq!(available(&ledger), 1);
        assert_eq!(
            ledger.record(&record.record_id).unwrap().actual_return_time,
            Some(at(11))
        );
    }

    #[test]
    fn test_return_unknown_record() {
        let ledger = ledger(1);
        assert!(matches!(
            ledger.return_item(&RecordId::from("br-deadbeef"), at(10)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_history_sorted_by_borrow_time() {
        let ledger = ledger(5);
        let item = ItemId::from("EQ002");
        for hour in [15, 9, 12] {
            ledger.borrow(&item, &request("984106503", hour)).unwrap();
        }
        ledger.borrow(&item, &request("411596453", 8)).unwrap();

        let times: Vec<_> = ledger
            .history_for("984106503")
            .unwrap()
            .map(|r| r.borrow_time)
            .collect();
        assert_eq!(times, vec![at(9), at(12), at(15)]);
    }

    #[test]
    fn test_overdue_and_active_for() {
        let ledger = ledger(3);
        let item = ItemId::from("EQ002");
        let early = ledger.borrow(&item, &request("a", 8)).unwrap();
        let late = ledger.borrow(&item, &request("b", 12)).unwrap();

        let overdue = ledger.overdue(at(11));
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].record_id, early.record_id);

        ledger.return_item(&early.record_id, at(11)).unwrap();
        assert!(ledger.overdue(at(11)).is_empty());

        let active = ledger.active_for(&item).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].record_id, late.record_id);
    }
}
