//! Randomize-and-sync: pick one candidate per slot and push the picks to the
//! remote service, slot by slot.
//!
//! Planning and execution are split so planning stays pure (testable without
//! I/O) and execution stays generic over the [`RemoteAssigner`] seam. A
//! failed remote call for one slot never aborts the remaining slots; an
//! authentication failure is flagged on the outcome so the caller can back
//! off and retry the whole cycle.

use badgewheel_bridge::catalog::SlotNumber;
use badgewheel_remote::{RemoteAssigner, RemoteError};
use rand::seq::SliceRandom;

use crate::slots::SlotTable;

/// One slot's planned action: assign the picked item, or clear the slot when
/// no candidate is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    pub slot: SlotNumber,
    /// `None` means "clear this slot".
    pub pick: Option<String>,
}

/// Result of one sync cycle.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    /// Slots whose remote call succeeded, with the id now assigned (or
    /// `None` for a cleared slot).
    pub updated: Vec<(SlotNumber, Option<String>)>,
    /// Slots whose remote call failed.
    pub failed: Vec<SlotNumber>,
    /// At least one call came back as "not authenticated". The cycle as a
    /// whole should be retried after backing off.
    pub auth_failure: bool,
}

/// Picks one candidate per slot.
///
/// Each pool is shuffled and the first item not already picked for an
/// earlier slot wins, so no item is planned for two slots in the same pass.
/// An empty pool, or a pool whose every member is already taken, plans a
/// clear instead.
pub fn plan_assignments(table: &SlotTable) -> Vec<SlotPlan> {
    let mut rng = rand::rng();
    let mut taken: Vec<String> = Vec::new();
    let mut plans = Vec::new();

    for (number, slot) in table.iter() {
        let mut candidates: Vec<&String> = slot.pool.keys().collect();
        candidates.shuffle(&mut rng);
        let pick = candidates
            .into_iter()
            .find(|id| !taken.contains(*id))
            .cloned();
        if let Some(id) = pick {
            taken.push(id.clone());
            plans.push(SlotPlan {
                slot: number,
                pick: Some(id),
            });
        } else {
            plans.push(SlotPlan {
                slot: number,
                pick: None,
            });
        }
    }
    plans
}

/// Pushes every planned action to the remote service, in slot order.
pub async fn execute_plans<R: RemoteAssigner>(remote: &R, plans: Vec<SlotPlan>) -> CycleOutcome {
    let mut outcome = CycleOutcome::default();
    for plan in plans {
        let result = match &plan.pick {
            Some(id) => remote.set_slot(id, plan.slot).await,
            None => remote.clear_slot(plan.slot).await,
        };
        match result {
            Ok(()) => outcome.updated.push((plan.slot, plan.pick)),
            Err(RemoteError::NotAuthenticated) => {
                log::warn!("slot {} rejected: session not authenticated", plan.slot);
                outcome.failed.push(plan.slot);
                outcome.auth_failure = true;
            }
            Err(e) => {
                log::warn!("slot {} update failed: {e}", plan.slot);
                outcome.failed.push(plan.slot);
            }
        }
    }
    outcome
}

/// Aggregate journal message for one cycle, listing the slots that updated.
pub fn summary_message(outcome: &CycleOutcome) -> String {
    if outcome.updated.is_empty() {
        return "Slots not updated".to_string();
    }
    let slots: Vec<String> = outcome
        .updated
        .iter()
        .map(|(slot, _)| slot.to_string())
        .collect();
    format!("Slots {} updated successfully", slots.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use badgewheel_remote::CatalogEntry;

    use crate::catalog::Catalog;
    use crate::selection::apply_slot_submission;

    fn table(pairs: &[(SlotNumber, &[&str])]) -> SlotTable {
        let mut ids = HashSet::new();
        for (_, slot_ids) in pairs {
            ids.extend(slot_ids.iter().copied());
        }
        let feed = ids
            .into_iter()
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
        let mut table = SlotTable::new();
        table.rebuild(&catalog);
        table
    }

    #[test]
    fn no_item_is_planned_twice() {
        // Heavily overlapping pools; run a few times since the shuffle is
        // non-deterministic.
        let table = table(&[
            (1, &["A", "B"]),
            (2, &["A", "B"]),
            (3, &["A", "B", "C"]),
            (4, &["C"]),
        ]);
        for _ in 0..50 {
            let plans = plan_assignments(&table);
            let picks: Vec<&String> = plans.iter().filter_map(|p| p.pick.as_ref()).collect();
            let unique: HashSet<&String> = picks.iter().copied().collect();
            assert_eq!(picks.len(), unique.len());
        }
    }

    #[test]
    fn empty_pool_plans_a_clear() {
        let table = table(&[(2, &["A"])]);
        let plans = plan_assignments(&table);

        assert_eq!(plans.len(), 5);
        assert_eq!(plans[0], SlotPlan { slot: 1, pick: None });
        assert_eq!(plans[1].pick.as_deref(), Some("A"));
    }

    #[test]
    fn exhausted_pool_plans_a_clear() {
        // Slot 2's only candidate is always taken by slot 1.
        let table = table(&[(1, &["A"]), (2, &["A"])]);
        let plans = plan_assignments(&table);

        assert_eq!(plans[0].pick.as_deref(), Some("A"));
        assert_eq!(plans[1].pick, None);
    }

    /// Remote fake that fails a fixed set of slots and records every attempt.
    struct FlakyRemote {
        fail_slots: Vec<SlotNumber>,
        auth_slots: Vec<SlotNumber>,
        attempts: Mutex<Vec<SlotNumber>>,
    }

    impl FlakyRemote {
        fn new(fail_slots: Vec<SlotNumber>, auth_slots: Vec<SlotNumber>) -> Self {
            Self {
                fail_slots,
                auth_slots,
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn respond(&self, slot: SlotNumber) -> Result<(), RemoteError> {
            self.attempts.lock().unwrap().push(slot);
            if self.auth_slots.contains(&slot) {
                return Err(RemoteError::NotAuthenticated);
            }
            if self.fail_slots.contains(&slot) {
                return Err(RemoteError::LoginRejected);
            }
            Ok(())
        }
    }

    impl RemoteAssigner for FlakyRemote {
        async fn set_slot(&self, _item_id: &str, slot: u8) -> Result<(), RemoteError> {
            self.respond(slot)
        }

        async fn clear_slot(&self, slot: u8) -> Result<(), RemoteError> {
            self.respond(slot)
        }

        async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, RemoteError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn one_failed_slot_does_not_stop_the_rest() {
        let remote = FlakyRemote::new(vec![2], vec![]);
        let plans: Vec<SlotPlan> = (1..=5)
            .map(|slot| SlotPlan {
                slot,
                pick: Some(format!("item-{slot}")),
            })
            .collect();

        let outcome = execute_plans(&remote, plans).await;
        assert_eq!(*remote.attempts.lock().unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(outcome.failed, vec![2]);
        assert_eq!(outcome.updated.len(), 4);
        assert!(!outcome.auth_failure);
    }

    #[tokio::test]
    async fn auth_failure_is_flagged_and_slot_not_marked_updated() {
        let remote = FlakyRemote::new(vec![], vec![3]);
        let plans: Vec<SlotPlan> = (1..=5)
            .map(|slot| SlotPlan {
                slot,
                pick: Some(format!("item-{slot}")),
            })
            .collect();

        let outcome = execute_plans(&remote, plans).await;
        assert!(outcome.auth_failure);
        assert!(outcome.updated.iter().all(|(slot, _)| *slot != 3));
        // The remaining slots were still attempted.
        assert_eq!(remote.attempts.lock().unwrap().len(), 5);
    }

    #[test]
    fn summary_lists_updated_slots() {
        let outcome = CycleOutcome {
            updated: vec![(1, Some("A".to_string())), (3, None)],
            failed: vec![2],
            auth_failure: false,
        };
        assert_eq!(summary_message(&outcome), "Slots 1 3 updated successfully");

        let nothing = CycleOutcome::default();
        assert_eq!(summary_message(&nothing), "Slots not updated");
    }
}
