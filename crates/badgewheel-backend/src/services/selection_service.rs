use badgewheel_bridge::MessageFromBackend;
use badgewheel_bridge::notification::NotificationType;

use crate::selection::{SlotSubmission, apply_slot_submission};
use crate::store::CURRENT_SELECTION_FILE;

/// Handles a slot submission from the control surface (see
/// [`badgewheel_bridge::MessageToBackend::SubmitSelection`]).
///
/// Recomputes every selection vector, rebuilds the candidate pools, and
/// persists the result as the current selection. The snapshot is computed
/// under the write lock, so each submission is atomic with respect to the
/// snapshot it writes; the write itself is fire-and-forget, with failures
/// reported through the journal.
pub async fn handle_submit_selection(context: super::AppContextHandle, submission: SlotSubmission) {
    let snapshot = {
        let mut state = context.state.write().await;
        apply_slot_submission(&mut state.catalog, &submission);
        let crate::state::State { catalog, slots, .. } = &mut *state;
        slots.rebuild(catalog);
        catalog.snapshot()
    };

    if let Err(e) = context.store.save(CURRENT_SELECTION_FILE, &snapshot).await {
        context
            .notify(
                NotificationType::Error,
                format!("Error saving selections to file: {e}"),
            )
            .await;
    }
}

/// Handles a category index request (see
/// [`badgewheel_bridge::MessageToBackend::CategoryIndexRequest`]).
pub async fn handle_category_index_request(context: super::AppContextHandle) {
    let index = {
        let state = context.state.read().await;
        state.catalog.categories()
    };
    context
        .send(MessageFromBackend::CategoryIndexResponse(index))
        .await;
}
