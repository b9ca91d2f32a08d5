// Rust guideline compliant 2026-10-19

//! Read-only catalog view with free-text and category filtering.

use crate::store::ItemStore;
use crate::{EquipmentItem, ItemId, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Category value that imposes no constraint.
pub const ALL_CATEGORIES: &str = "All";

/// Catalog filter options.
///
/// Both constraints must hold for an item to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against name or description.
    /// Empty means no constraint.
    pub search_text: String,
    /// Exact category match. [`ALL_CATEGORIES`] means no constraint.
    pub category: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl CatalogFilter {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    fn compile(&self) -> CompiledFilter<'_> {
        let needle = self.search_text.trim();
        let category = self.category.as_str();
        CompiledFilter {
            needle: (!needle.is_empty()).then(|| needle.to_lowercase()),
            category: (category != ALL_CATEGORIES).then_some(category),
        }
    }

    /// Returns true if the item satisfies both constraints.
    pub fn matches(&self, item: &EquipmentItem) -> bool {
        self.compile().matches(item)
    }
}

#[derive(Debug)]
struct CompiledFilter<'a> {
    needle: Option<String>,
    category: Option<&'a str>,
}

impl CompiledFilter<'_> {
    fn matches(&self, item: &EquipmentItem) -> bool {
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }

        if let Some(ref needle) = self.needle {
            if !item.name.to_lowercase().contains(needle.as_str())
                && !item.description.to_lowercase().contains(needle.as_str())
            {
                return false;
            }
        }

        true
    }
}

/// Lazy listing of catalog items, in item ID order.
///
/// Each step snapshots one item under its read lock. Calling
/// [`CatalogIndex::list`] again restarts the sequence.
pub struct Listing<'a> {
    slots: Box<dyn Iterator<Item = &'a crate::store::ItemSlot> + 'a>,
    filter: CompiledFilter<'a>,
}

impl Iterator for Listing<'_> {
    type Item = EquipmentItem;

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            let state = slot.read();
            if !state.item.retired && self.filter.matches(&state.item) {
                return Some(state.item.clone());
            }
        }
        None
    }
}

/// Read-only view over the item store.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    store: Arc<ItemStore>,
}

impl CatalogIndex {
    /// Creates a catalog view over a shared store.
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }

    /// Lists non-retired items matching the filter.
    ///
    /// An empty catalog or a filter with no match yields an empty sequence.
    pub fn list<'a>(&'a self, filter: &'a CatalogFilter) -> Listing<'a> {
        Listing {
            slots: Box::new(self.store.slots()),
            filter: filter.compile(),
        }
    }

    /// Returns a snapshot of one item, retired or not.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item has this ID.
    pub fn get(&self, id: &ItemId) -> Result<EquipmentItem> {
        Ok(self.store.slot(id)?.read().item.clone())
    }

    /// Category picker values: [`ALL_CATEGORIES`] followed by every listed
    /// category, sorted and de-duplicated.
    pub fn categories(&self) -> Vec<String> {
        let filter = CatalogFilter::default();
        let distinct: BTreeSet<String> = self.list(&filter).map(|item| item.category).collect();

        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(distinct)
            .collect()
    }
}
