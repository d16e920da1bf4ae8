use std::time::Duration;

use badgewheel_bridge::MessageFromBackend;
use badgewheel_bridge::notification::NotificationType;

use crate::catalog::Catalog;
use crate::store::{CURRENT_SELECTION_FILE, SnapshotStore};

/// Extra hold time on top of the configured interval between rotation steps.
const ROTATION_BUFFER: Duration = Duration::from_secs(1);

/// Handles a save-preset request (see
/// [`badgewheel_bridge::MessageToBackend::SavePreset`]).
pub async fn handle_save_preset(context: super::AppContextHandle, name: String) {
    let name = name.trim();
    if name.is_empty() {
        context.reject("Preset name not provided").await;
        return;
    }

    let snapshot = {
        let state = context.state.read().await;
        state.catalog.snapshot()
    };
    match context
        .store
        .save(&SnapshotStore::preset_file(name), &snapshot)
        .await
    {
        Ok(()) => {
            context
                .notify(NotificationType::Success, format!("Saved preset {name}"))
                .await
        }
        Err(e) => {
            context
                .notify(
                    NotificationType::Error,
                    format!("Error saving preset {name}: {e}"),
                )
                .await
        }
    }
}

/// Handles a preset list request (see
/// [`badgewheel_bridge::MessageToBackend::PresetListRequest`]).
pub async fn handle_preset_list_request(context: super::AppContextHandle) {
    let names = context.store.list_presets().await;
    context
        .send(MessageFromBackend::PresetListResponse(names))
        .await;
}

/// Handles a rotation start request (see
/// [`badgewheel_bridge::MessageToBackend::StartRotation`]).
///
/// Unknown preset names are filtered out against the store; if nothing valid
/// remains the request is rejected and any running rotation is left alone.
/// Otherwise the current rotation (if any) is cancelled and awaited before
/// the new loop starts.
pub async fn handle_start_rotation(context: super::AppContextHandle, names: Vec<String>) {
    let available = context.store.list_presets().await;
    let requested: Vec<String> = names
        .into_iter()
        .filter(|name| available.iter().any(|a| a == name))
        .collect();
    if requested.is_empty() {
        context.reject("The requested preset does not exist").await;
        return;
    }

    let apply_context = context.clone();
    let apply = move |name: String| {
        let context = apply_context.clone();
        async move {
            context
                .notify(NotificationType::Info, format!("loading {name} preset"))
                .await;
            apply_preset(&context, &name).await;
            let minutes = {
                let state = context.state.read().await;
                state.config.interval_minutes
            };
            Duration::from_secs(minutes * 60) + ROTATION_BUFFER
        }
    };

    let mut rotation = context.rotation.lock().await;
    rotation.replace(requested, apply).await;
}

/// Loads a named preset into the live selection: catalog replaced wholesale,
/// pools rebuilt, and the result written back as the current selection.
/// Every failure downgrades to an empty selection plus a journal entry.
pub(crate) async fn apply_preset(context: &super::AppContextHandle, name: &str) {
    let snapshot = context
        .store
        .load_or_empty(&SnapshotStore::preset_file(name), &context.journal)
        .await;

    let current = {
        let mut state = context.state.write().await;
        state.catalog = Catalog::from_snapshot(snapshot);
        let crate::state::State { catalog, slots, .. } = &mut *state;
        slots.rebuild(catalog);
        catalog.snapshot()
    };

    if let Err(e) = context.store.save(CURRENT_SELECTION_FILE, &current).await {
        context
            .notify(
                NotificationType::Error,
                format!("Error saving selections to file: {e}"),
            )
            .await;
    }
}
