//! The fixed slot table and its derived candidate pools.

use std::collections::BTreeMap;

use badgewheel_bridge::catalog::{Item, SlotNumber, slot_numbers};

use crate::catalog::Catalog;

/// One assignment slot.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    /// Id of the item currently assigned on the remote side, if any.
    /// Written only by the sync engine after a successful remote call.
    pub assigned: Option<String>,
    /// Items eligible for this slot, derived from the catalog.
    pub pool: BTreeMap<String, Item>,
}

/// The fixed set of slots, keyed by slot number.
#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: BTreeMap<SlotNumber, Slot>,
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotTable {
    /// Creates the table with every slot present, unassigned, and with an
    /// empty pool.
    pub fn new() -> Self {
        Self {
            slots: slot_numbers().map(|n| (n, Slot::default())).collect(),
        }
    }

    /// Recomputes every candidate pool from the catalog.
    ///
    /// Only items present in the live catalog can enter a pool, so stale ids
    /// in an old snapshot drop out silently. Assignments are left untouched;
    /// an assigned item that is no longer a candidate stays assigned until
    /// the next sync pass replaces it.
    pub fn rebuild(&mut self, catalog: &Catalog) {
        for (number, slot) in &mut self.slots {
            let index = usize::from(*number) - 1;
            slot.pool = catalog
                .items()
                .filter(|item| item.selected.get(index).copied().unwrap_or(false))
                .map(|item| (item.id.clone(), item.clone()))
                .collect();
        }
    }

    /// Records the outcome of a successful remote assignment.
    pub fn assign(&mut self, number: SlotNumber, item_id: Option<String>) {
        if let Some(slot) = self.slots.get_mut(&number) {
            slot.assigned = item_id;
        }
    }

    pub fn get(&self, number: SlotNumber) -> Option<&Slot> {
        self.slots.get(&number)
    }

    /// Slots in ascending slot-number order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotNumber, &Slot)> {
        self.slots.iter().map(|(n, s)| (*n, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badgewheel_remote::CatalogEntry;

    use crate::selection::apply_slot_submission;

    fn catalog_with_submission(ids: &[&str], pairs: &[(SlotNumber, &[&str])]) -> Catalog {
        let feed = ids
            .iter()
            .map(|id| CatalogEntry {
                id: id.to_string(),
                category: String::new(),
                image_ref: String::new(),
            })
            .collect();
        let mut catalog = Catalog::from_feed(feed, &Catalog::default());
        let submission = pairs
            .iter()
            .map(|(slot, ids)| (*slot, ids.iter().map(|s| s.to_string()).collect()))
            .collect();
        apply_slot_submission(&mut catalog, &submission);
        catalog
    }

    #[test]
    fn pools_follow_the_selection_vectors() {
        let catalog = catalog_with_submission(&["A", "B"], &[(1, &["A", "B"]), (4, &["B"])]);
        let mut table = SlotTable::new();
        table.rebuild(&catalog);

        assert_eq!(table.get(1).unwrap().pool.len(), 2);
        assert!(table.get(4).unwrap().pool.contains_key("B"));
        assert!(table.get(2).unwrap().pool.is_empty());
    }

    #[test]
    fn rebuild_preserves_assignments() {
        let catalog = catalog_with_submission(&["A"], &[(1, &["A"])]);
        let mut table = SlotTable::new();
        table.assign(1, Some("A".to_string()));

        table.rebuild(&catalog);
        assert_eq!(table.get(1).unwrap().assigned.as_deref(), Some("A"));

        // Pool can drop the assigned item without clearing the assignment.
        table.rebuild(&Catalog::default());
        assert!(table.get(1).unwrap().pool.is_empty());
        assert_eq!(table.get(1).unwrap().assigned.as_deref(), Some("A"));
    }
}
