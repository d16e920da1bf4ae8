//! Selection recomputation from a control-surface slot submission.

use std::collections::{BTreeMap, BTreeSet};

use badgewheel_bridge::catalog::{SLOT_COUNT, SlotNumber, slot_numbers};

use crate::catalog::Catalog;

/// A slot submission: for each slot, the item ids the operator checked.
/// Slots absent from the map are treated as submitted empty.
pub type SlotSubmission = BTreeMap<SlotNumber, BTreeSet<String>>;

/// Recomputes every item's selection vector from a submission.
///
/// The recomputation is total: an item checked for a slot gets `true` there,
/// every other entry becomes `false`, and items absent from all submitted
/// slots end up with an all-false vector rather than being removed. Applying
/// the same submission twice yields an identical catalog.
pub fn apply_slot_submission(catalog: &mut Catalog, submission: &SlotSubmission) {
    for item in catalog.items_mut() {
        item.selected.resize(SLOT_COUNT, false);
        for slot in slot_numbers() {
            let checked = submission
                .get(&slot)
                .is_some_and(|ids| ids.contains(&item.id));
            item.selected[usize::from(slot) - 1] = checked;
        }
    }
}
