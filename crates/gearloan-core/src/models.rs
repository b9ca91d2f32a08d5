// Rust guideline compliant 2026-10-19

//! Core data models for Gearloan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Stable identifier of an equipment item (e.g. `EQ002`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of a borrow record (format: br-XXXXXXXX).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

macro_rules! impl_string_id {
    ($t:ty) => {
        impl $t {
            /// Wraps a raw identifier string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

impl_string_id!(ItemId);
impl_string_id!(RecordId);

/// Availability status of an item, always derived from its quantities and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// At least one unit can be borrowed.
    Available,
    /// Every unit is out on loan.
    FullyBorrowed,
    /// Administratively withdrawn regardless of quantity.
    UnderMaintenance,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemStatus::Available => "available",
            ItemStatus::FullyBorrowed => "fully borrowed",
            ItemStatus::UnderMaintenance => "under maintenance",
        };
        f.write_str(label)
    }
}

/// State of a borrow record in the lending FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// The unit is out on loan.
    Active,
    /// The unit came back. Terminal.
    Returned,
}

/// A kind of physical equipment with a tracked unit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    /// Unique, immutable identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Open-ended category label (e.g. Camera, Tablet).
    pub category: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Units owned.
    pub total_quantity: u32,
    /// Units currently on the shelf.
    pub available_quantity: u32,
    /// Administrative override taking the item out of circulation.
    #[serde(default)]
    pub under_maintenance: bool,
    /// Soft-retired items are hidden from the catalog and cannot be borrowed.
    #[serde(default)]
    pub retired: bool,
}

impl EquipmentItem {
    /// Creates an item with every unit available.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        category: impl Into<String>,
        total_quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            total_quantity,
            available_quantity: total_quantity,
            under_maintenance: false,
            retired: false,
        }
    }

    /// Sets the description, builder style.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Derives the live status from the maintenance flag and quantity.
    pub fn status(&self) -> ItemStatus {
        if self.under_maintenance {
            ItemStatus::UnderMaintenance
        } else if self.available_quantity > 0 {
            ItemStatus::Available
        } else {
            ItemStatus::FullyBorrowed
        }
    }

    /// Units currently out on loan.
    pub fn borrowed_quantity(&self) -> u32 {
        self.total_quantity.saturating_sub(self.available_quantity)
    }
}

/// Catalog entry as shown to callers, with the derived status attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub total_quantity: u32,
    pub available_quantity: u32,
    pub status: ItemStatus,
}

impl From<EquipmentItem> for ItemView {
    fn from(item: EquipmentItem) -> Self {
        let status = item.status();
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            description: item.description,
            total_quantity: item.total_quantity,
            available_quantity: item.available_quantity,
            status,
        }
    }
}

/// Borrower-supplied part of a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub borrower_id: String,
    pub borrower_name: String,
    pub borrow_time: DateTime<Utc>,
    pub expected_return_time: DateTime<Utc>,
    #[serde(default)]
    pub purpose: Option<String>,
}

impl BorrowRequest {
    /// Returns a trimmed copy of the request after checking required fields.
    ///
    /// Blank purposes collapse to `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if:
    /// - Borrower ID or name is blank
    /// - Expected return time is not after borrow time
    pub fn normalized(&self) -> Result<Self> {
        let borrower_id = self.borrower_id.trim();
        let borrower_name = self.borrower_name.trim();

        if borrower_id.is_empty() {
            return Err(Error::InvalidRequest(
                "Borrower ID cannot be empty".to_string(),
            ));
        }

        if borrower_name.is_empty() {
            return Err(Error::InvalidRequest(
                "Borrower name cannot be empty".to_string(),
            ));
        }

        if self.expected_return_time <= self.borrow_time {
            return Err(Error::InvalidRequest(format!(
                "Expected return time {} must be after borrow time {}",
                self.expected_return_time.to_rfc3339(),
                self.borrow_time.to_rfc3339()
            )));
        }

        let purpose = self
            .purpose
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(Self {
            borrower_id: borrower_id.to_string(),
            borrower_name: borrower_name.to_string(),
            borrow_time: self.borrow_time,
            expected_return_time: self.expected_return_time,
            purpose,
        })
    }
}

/// A single loan linking a borrower to one unit of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub record_id: RecordId,
    pub borrower_id: String,
    pub borrower_name: String,
    pub item_id: ItemId,
    pub borrow_time: DateTime<Utc>,
    pub expected_return_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_return_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub state: RecordState,
}

impl BorrowRecord {
    /// Builds an `Active` record from an already normalized request.
    pub fn active(record_id: RecordId, item_id: ItemId, request: BorrowRequest) -> Self {
        Self {
            record_id,
            borrower_id: request.borrower_id,
            borrower_name: request.borrower_name,
            item_id,
            borrow_time: request.borrow_time,
            expected_return_time: request.expected_return_time,
            actual_return_time: None,
            purpose: request.purpose,
            state: RecordState::Active,
        }
    }

    /// Returns true while the unit is still out.
    pub fn is_active(&self) -> bool {
        self.state == RecordState::Active
    }

    /// Returns true if the loan is active and past its expected return time.
    pub fn is_overdue_at(&self, at: DateTime<Utc>) -> bool {
        self.is_active() && self.expected_return_time < at
    }
}
