// Rust guideline compliant 2026-10-19

//! Initial catalog loading.
//!
//! The core never persists anything; it consumes an initial set of items and
//! historical records from a seed document. Two layouts are accepted:
//!
//! - a JSON object `{"items": [...], "records": [...]}`
//! - JSON Lines, one object per line, tagged `"kind": "item"` or `"kind": "record"`

use crate::store::ItemStore;
use crate::{
    BorrowRecord, BorrowRequest, EquipmentItem, Error, ItemId, RecordId, RecordState, Result,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Item entry of a seed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub total_quantity: u32,
    /// Optional cross-check against the derived value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<u32>,
    #[serde(default)]
    pub under_maintenance: bool,
    #[serde(default)]
    pub retired: bool,
}

/// Historical record entry of a seed document.
///
/// A record with `actual_return_time` is loaded as `Returned`, otherwise as
/// `Active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
    pub item_id: ItemId,
    pub borrower_id: String,
    pub borrower_name: String,
    pub borrow_time: DateTime<Utc>,
    pub expected_return_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_return_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SeedLine {
    Item(SeedItem),
    Record(SeedRecord),
}

/// Initial inventory contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub items: Vec<SeedItem>,
    #[serde(default)]
    pub records: Vec<SeedRecord>,
}

impl Seed {
    /// Loads a seed file, picking the layout from the extension.
    ///
    /// `.jsonl` files are read as JSON Lines; anything else as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);

        let is_jsonl = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("jsonl"))
            .unwrap_or(false);

        let seed = if is_jsonl {
            Self::from_jsonl_reader(reader)?
        } else {
            serde_json::from_reader(reader)?
        };

        tracing::debug!(
            path = %path.display(),
            items = seed.items.len(),
            records = seed.records.len(),
            "seed loaded"
        );
        Ok(seed)
    }

    /// Parses a JSON seed object.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid seed object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a JSON Lines seed one line at a time.
    ///
    /// Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` naming the line if an entry does not parse,
    /// or `Io` if the reader fails.
    pub fn from_jsonl_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut seed = Self::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SeedLine>(&line) {
                Ok(SeedLine::Item(item)) => seed.items.push(item),
                Ok(SeedLine::Record(record)) => seed.records.push(record),
                Err(e) => {
                    tracing::warn!(line = number + 1, error = %e, "malformed seed line");
                    return Err(Error::InvalidRequest(format!("seed line {}: {}", number + 1, e)));
                }
            }
        }

        Ok(seed)
    }

    /// Validates the seed and builds a store from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if:
    /// - A record fails borrow validation or was returned before it was borrowed
    /// - An explicit `availableQuantity` disagrees with the active records
    /// - Active records outnumber an item's total
    /// - IDs collide or a record references an unknown item
    pub fn into_store(self) -> Result<ItemStore> {
        let mut active: HashMap<ItemId, u32> = HashMap::new();
        let mut records = Vec::with_capacity(self.records.len());

        for (position, seed_record) in self.records.into_iter().enumerate() {
            let record = seed_record.into_record(position)?;
            if record.is_active() {
                *active.entry(record.item_id.clone()).or_default() += 1;
            }
            records.push(record);
        }

        let mut items = Vec::with_capacity(self.items.len());
        for seed_item in self.items {
            let out = active.get(&seed_item.id).copied().unwrap_or(0);
            if out > seed_item.total_quantity {
                return Err(Error::InvalidRequest(format!(
                    "item {} has {} active records but only {} units",
                    seed_item.id, out, seed_item.total_quantity
                )));
            }

            let derived = seed_item.total_quantity - out;
            if let Some(declared) = seed_item.available_quantity {
                if declared != derived {
                    return Err(Error::InvalidRequest(format!(
                        "item {} declares {} available but its records leave {}",
                        seed_item.id, declared, derived
                    )));
                }
            }

            items.push(EquipmentItem {
                id: seed_item.id,
                name: seed_item.name,
                category: seed_item.category,
                description: seed_item.description,
                total_quantity: seed_item.total_quantity,
                available_quantity: derived,
                under_maintenance: seed_item.under_maintenance,
                retired: seed_item.retired,
            });
        }

        ItemStore::from_parts(items, records)
    }
}

impl SeedRecord {
    fn into_record(self, position: usize) -> Result<BorrowRecord> {
        let request = BorrowRequest {
            borrower_id: self.borrower_id,
            borrower_name: self.borrower_name,
            borrow_time: self.borrow_time,
            expected_return_time: self.expected_return_time,
            purpose: self.purpose,
        }
        .normalized()
        .map_err(|e| Error::InvalidRequest(format!("seed record #{}: {}", position + 1, e)))?;

        let record_id = match self.record_id {
            Some(id) => {
                crate::identity::validate_record_id_format(id.as_str()).map_err(|e| {
                    Error::InvalidRequest(format!("seed record #{}: {}", position + 1, e))
                })?;
                id
            }
            None => crate::identity::generate_record_id(
                &self.item_id,
                &request.borrower_id,
                request.borrow_time,
                position as u32,
            ),
        };

        let mut record = BorrowRecord::active(record_id, self.item_id, request);

        if let Some(returned_at) = self.actual_return_time {
            if returned_at < record.borrow_time {
                return Err(Error::InvalidRequest(format!(
                    "seed record {} was returned before it was borrowed",
                    record.record_id
                )));
            }
            record.state = RecordState::Returned;
            record.actual_return_time = Some(returned_at);
        }

        Ok(record)
    }
}
