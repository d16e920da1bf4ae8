use serde::{Deserialize, Serialize};

/// Number of badge slots on the remote profile. Slots are numbered 1..=5.
pub const SLOT_COUNT: usize = 5;

/// One-based slot number, 1..=[`SLOT_COUNT`].
pub type SlotNumber = u8;

/// Returns all slot numbers in ascending order.
pub fn slot_numbers() -> impl Iterator<Item = SlotNumber> {
    1..=SLOT_COUNT as SlotNumber
}

/// A badge from the catalog, together with its per-slot selection vector.
///
/// `selected[i]` records whether the operator checked this badge as a
/// candidate for slot `i + 1`. The full map of items (with their vectors) is
/// exactly the unit that gets persisted as a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique badge identifier, as known to the remote service.
    pub id: String,
    /// Category the badge is listed under. May be empty in the feed.
    pub category: String,
    /// Image reference used to render the badge.
    pub image_ref: String,
    /// Per-slot candidacy flags, always [`SLOT_COUNT`] long.
    pub selected: Vec<bool>,
}

impl Item {
    /// Creates an item with an all-false selection vector.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            image_ref: image_ref.into(),
            selected: vec![false; SLOT_COUNT],
        }
    }

    /// Whether this item is a candidate for at least one slot.
    pub fn is_active(&self) -> bool {
        self.selected.iter().any(|&s| s)
    }
}
