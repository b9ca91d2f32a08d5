// Rust guideline compliant 2026-10-19

//! Shared item store backing the catalog and the ledger.
//!
//! Every item lives in its own [`ItemSlot`] together with all of its borrow
//! records, so a borrow or return touches exactly one lock. The slot table is
//! fixed at construction. A separate record index maps record IDs to their
//! item and borrower IDs to their records.
//!
//! Lock order: a slot write guard may be held while taking the record index
//! lock, never the reverse.

use crate::{identity, BorrowRecord, EquipmentItem, Error, ItemId, RecordId, Result};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An item together with every record that references it.
#[derive(Debug, Clone)]
pub(crate) struct SlotState {
    pub(crate) item: EquipmentItem,
    pub(crate) records: Vec<BorrowRecord>,
}

impl SlotState {
    pub(crate) fn active_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_active()).count()
    }
}

/// Lock-guarded item slot.
#[derive(Debug)]
pub(crate) struct ItemSlot(RwLock<SlotState>);

impl ItemSlot {
    fn new(state: SlotState) -> Self {
        Self(RwLock::new(state))
    }

    /// Read guard. Slot state is only written after every check passes, so a
    /// poisoned guard still holds a consistent state.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, SlotState> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, SlotState>> {
        self.0.write().map_err(|_| Error::poisoned("item slot"))
    }
}

#[derive(Debug, Default)]
struct RecordIndex {
    by_id: HashMap<RecordId, ItemId>,
    by_borrower: HashMap<String, Vec<RecordId>>,
}

impl RecordIndex {
    fn insert(&mut self, record: &BorrowRecord) {
        self.by_id
            .insert(record.record_id.clone(), record.item_id.clone());
        self.by_borrower
            .entry(record.borrower_id.clone())
            .or_default()
            .push(record.record_id.clone());
    }
}

/// Owned state of one inventory: items, their records, and lookup indexes.
#[derive(Debug)]
pub struct ItemStore {
    slots: BTreeMap<ItemId, ItemSlot>,
    records: RwLock<RecordIndex>,
}

impl ItemStore {
    /// Creates a store from items that have no loan history.
    ///
    /// Each item's available quantity is reset to its total.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` on duplicate item IDs.
    pub fn new(items: Vec<EquipmentItem>) -> Result<Self> {
        let items = items
            .into_iter()
            .map(|mut item| {
                item.available_quantity = item.total_quantity;
                item
            })
            .collect();
        Self::from_parts(items, Vec::new())
    }

    /// Creates a store from items and their existing records.
    ///
    /// Items must already carry `available_quantity = total - active records`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if:
    /// - Two items or two records share an ID
    /// - A record references an unknown item
    /// - An item's quantities disagree with its active records
    pub(crate) fn from_parts(items: Vec<EquipmentItem>, records: Vec<BorrowRecord>) -> Result<Self> {
        let mut states: BTreeMap<ItemId, SlotState> = BTreeMap::new();
        for item in items {
            if item.id.as_str().trim().is_empty() {
                return Err(Error::InvalidRequest("Item ID cannot be empty".to_string()));
            }
            if states.contains_key(&item.id) {
                return Err(Error::InvalidRequest(format!(
                    "Duplicate item ID: {}",
                    item.id
                )));
            }
            states.insert(
                item.id.clone(),
                SlotState {
                    item,
                    records: Vec::new(),
                },
            );
        }

        let mut index = RecordIndex::default();
        for record in records {
            if index.by_id.contains_key(&record.record_id) {
                return Err(Error::InvalidRequest(format!(
                    "Duplicate record ID: {}",
                    record.record_id
                )));
            }
            let state = states.get_mut(&record.item_id).ok_or_else(|| {
                Error::InvalidRequest(format!(
                    "Record {} references unknown item {}",
                    record.record_id, record.item_id
                ))
            })?;
            index.insert(&record);
            state.records.push(record);
        }

        for state in states.values() {
            check_slot(state).map_err(|e| match e {
                Error::InternalInvariantViolation(msg) => Error::InvalidRequest(msg),
                other => other,
            })?;
        }

        let slots = states
            .into_iter()
            .map(|(id, state)| (id, ItemSlot::new(state)))
            .collect();

        Ok(Self {
            slots,
            records: RwLock::new(index),
        })
    }

    /// Number of items, retired ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn slot(&self, id: &ItemId) -> Result<&ItemSlot> {
        self.slots
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("item {}", id)))
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = &ItemSlot> + '_ {
        self.slots.values()
    }

    /// Parallel scan over every slot, used by whole-inventory queries on
    /// large catalogs.
    pub(crate) fn par_slots(&self) -> impl ParallelIterator<Item = &ItemSlot> + '_ {
        self.slots.par_iter().map(|(_, slot)| slot)
    }

    /// Finds the item that owns a record.
    pub(crate) fn locate(&self, record_id: &RecordId) -> Result<ItemId> {
        let index = self
            .records
            .read()
            .map_err(|_| Error::poisoned("record index"))?;
        index
            .by_id
            .get(record_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("record {}", record_id)))
    }

    /// Record IDs of one borrower, in creation order.
    pub(crate) fn records_of(&self, borrower_id: &str) -> Result<Vec<(RecordId, ItemId)>> {
        let index = self
            .records
            .read()
            .map_err(|_| Error::poisoned("record index"))?;
        Ok(index
            .by_borrower
            .get(borrower_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| index.by_id.get(id).map(|item| (id.clone(), item.clone())))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Every known record ID.
    pub(crate) fn record_ids(&self) -> Result<Vec<RecordId>> {
        let index = self
            .records
            .read()
            .map_err(|_| Error::poisoned("record index"))?;
        Ok(index.by_id.keys().cloned().collect())
    }

    /// Picks an unused ID for `record` and indexes it.
    ///
    /// Must be called with the owning slot's write guard held, right before
    /// the record is pushed into the slot.
    pub(crate) fn assign_record_id(&self, record: &mut BorrowRecord) -> Result<()> {
        let mut index = self
            .records
            .write()
            .map_err(|_| Error::poisoned("record index"))?;

        let mut nonce = 0u32;
        record.record_id = loop {
            let id = identity::generate_record_id(
                &record.item_id,
                &record.borrower_id,
                record.borrow_time,
                nonce,
            );
            if !index.by_id.contains_key(&id) {
                break id;
            }
            nonce = nonce.checked_add(1).ok_or_else(|| {
                Error::InternalInvariantViolation("record ID space exhausted".to_string())
            })?;
        };

        index.insert(record);
        Ok(())
    }
}

/// Checks the quantity invariant of one slot.
pub(crate) fn check_slot(state: &SlotState) -> Result<()> {
    let item = &state.item;
    if item.available_quantity > item.total_quantity {
        return Err(Error::InternalInvariantViolation(format!(
            "item {} has {} available but only {} total",
            item.id, item.available_quantity, item.total_quantity
        )));
    }

    let active = state.active_count();
    let borrowed = item.borrowed_quantity() as usize;
    if borrowed != active {
        return Err(Error::InternalInvariantViolation(format!(
            "item {} has {} units out but {} active records",
            item.id, borrowed, active
        )));
    }

    Ok(())
}
