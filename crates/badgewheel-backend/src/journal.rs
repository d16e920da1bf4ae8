//! Bounded, newest-first notification journal.
//!
//! The journal is the sole channel for surfacing degraded operation to the
//! operator; the control surface renders it verbatim. Entries are immutable
//! once recorded, appends are serialized by a mutex, and reads hand out a
//! cloned snapshot so no caller ever observes a half-applied append.

use std::sync::Mutex;

use badgewheel_bridge::notification::NotificationEntry;

/// Maximum number of entries retained; the oldest are dropped on overflow.
pub const JOURNAL_CAPACITY: usize = 50;

/// Shared append-only event journal, newest first.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Mutex<Vec<NotificationEntry>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a timestamped entry, trimming the tail past
    /// [`JOURNAL_CAPACITY`].
    pub fn record(&self, message: impl Into<String>) {
        let entry = NotificationEntry::now(message);
        log::info!("{}", entry.message);
        let mut entries = self.entries.lock().expect("journal mutex poisoned");
        entries.insert(0, entry);
        entries.truncate(JOURNAL_CAPACITY);
    }

    /// Returns a snapshot of the journal, most recent entry first.
    pub fn recent(&self) -> Vec<NotificationEntry> {
        self.entries.lock().expect("journal mutex poisoned").clone()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("journal mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_is_first() {
        let journal = Journal::new();
        journal.record("first");
        journal.record("second");

        let entries = journal.recent();
        assert_eq!(entries[0].message, "second");
        assert_eq!(entries[1].message, "first");
    }

    #[test]
    fn capacity_is_enforced_oldest_dropped() {
        let journal = Journal::new();
        for i in 0..=JOURNAL_CAPACITY {
            journal.record(format!("entry {i}"));
        }

        let entries = journal.recent();
        assert_eq!(entries.len(), JOURNAL_CAPACITY);
        assert_eq!(entries[0].message, format!("entry {JOURNAL_CAPACITY}"));
        assert!(entries.iter().all(|e| e.message != "entry 0"));
    }
}
