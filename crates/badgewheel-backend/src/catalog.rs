//! The badge catalog and its derived category index.
//!
//! The catalog is the authoritative in-memory map of items, including each
//! item's per-slot selection vector; it is exactly the unit that gets
//! persisted as a snapshot. It is replaced wholesale (new feed, preset load)
//! rather than mutated item-by-item, so readers always see a consistent map.

use std::collections::{BTreeMap, HashMap};

use badgewheel_bridge::catalog::{Item, SLOT_COUNT};
use badgewheel_remote::CatalogEntry;

use crate::store::Snapshot;

/// Items with an empty category in the feed are grouped here instead of
/// being dropped.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The in-memory item map.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
}

impl Catalog {
    /// Builds a catalog from a persisted snapshot. Selection vectors are
    /// normalized to [`SLOT_COUNT`] entries so a snapshot written against a
    /// different slot layout cannot poison later indexing.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let items = snapshot
            .into_iter()
            .map(|(id, mut item)| {
                item.selected.resize(SLOT_COUNT, false);
                (id, item)
            })
            .collect();
        Self { items }
    }

    /// Builds a catalog from a remote feed, carrying over the selection
    /// vectors of items the operator had already marked. Items gone from the
    /// feed are dropped; new items start with an all-false vector.
    pub fn from_feed(entries: Vec<CatalogEntry>, previous: &Catalog) -> Self {
        let items = entries
            .into_iter()
            .map(|entry| {
                let mut item = Item::new(entry.id.clone(), entry.category, entry.image_ref);
                if let Some(known) = previous.items.get(&entry.id) {
                    item.selected = known.selected.clone();
                    item.selected.resize(SLOT_COUNT, false);
                }
                (entry.id, item)
            })
            .collect();
        Self { items }
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.values_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clones the item map in its persisted form.
    pub fn snapshot(&self) -> Snapshot {
        self.items.clone()
    }

    /// Derives the category index: category name to items, both ordered.
    /// Pure and idempotent; items with a blank category land under
    /// [`UNCATEGORIZED`].
    pub fn categories(&self) -> BTreeMap<String, Vec<Item>> {
        let mut index: BTreeMap<String, Vec<Item>> = BTreeMap::new();
        for item in self.items.values() {
            let category = if item.category.trim().is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                item.category.clone()
            };
            index.entry(category).or_default().push(item.clone());
        }
        for items in index.values_mut() {
            items.sort_by(|a, b| a.id.cmp(&b.id));
        }
        index
    }
}
