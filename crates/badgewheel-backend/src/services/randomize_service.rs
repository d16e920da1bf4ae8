use std::time::Duration;

use badgewheel_bridge::notification::NotificationType;
use badgewheel_remote::RemoteAssigner;
use tokio::sync::watch;

use crate::catalog::Catalog;
use crate::randomize;

/// Sleep before retrying a cycle that failed to refresh or authenticate.
const RETRY_BACKOFF: Duration = Duration::from_secs(10);

/// Handles a manual randomize trigger (see
/// [`badgewheel_bridge::MessageToBackend::RandomizeNow`]).
pub async fn handle_randomize_now(context: super::AppContextHandle) {
    run_cycle(&context).await;
}

/// Runs one randomize-and-sync cycle: plan picks under the read lock, push
/// them to the remote service without holding any lock, then record the
/// successes. Returns `false` when the cycle hit an authentication failure
/// and should be retried after a backoff.
pub(crate) async fn run_cycle(context: &super::AppContextHandle) -> bool {
    let (session, plans) = {
        let state = context.state.read().await;
        (state.session.clone(), randomize::plan_assignments(&state.slots))
    };
    let Some(session) = session else {
        context
            .notify(
                NotificationType::Warning,
                "Not logged in; skipping randomize pass",
            )
            .await;
        return true;
    };

    let outcome = randomize::execute_plans(&session, plans).await;

    {
        let mut state = context.state.write().await;
        for (slot, assigned) in &outcome.updated {
            state.slots.assign(*slot, assigned.clone());
        }
    }

    context
        .notify(
            NotificationType::Info,
            randomize::summary_message(&outcome),
        )
        .await;
    if outcome.auth_failure {
        context
            .notify(
                NotificationType::Error,
                "Invalid username or password. Log in again and retry.",
            )
            .await;
        return false;
    }
    true
}

/// The long-lived background scheduler.
///
/// Parks on the ready gate until the first successful login, then loops:
/// refresh the catalog from the remote feed, randomize and sync, sleep for
/// the configured interval. Refresh and authentication failures back off for
/// [`RETRY_BACKOFF`] and retry the whole cycle; nothing here ever terminates
/// the process.
pub(crate) async fn randomize_loop(
    context: super::AppContextHandle,
    mut ready: watch::Receiver<bool>,
) {
    while !*ready.borrow() {
        if ready.changed().await.is_err() {
            return;
        }
    }

    loop {
        context
            .notify(NotificationType::Info, "Attempting to randomize badges")
            .await;

        if !refresh_catalog(&context).await {
            tokio::time::sleep(RETRY_BACKOFF).await;
            continue;
        }

        if !run_cycle(&context).await {
            tokio::time::sleep(RETRY_BACKOFF).await;
            continue;
        }

        let minutes = {
            let state = context.state.read().await;
            state.config.interval_minutes
        };
        tokio::time::sleep(Duration::from_secs(minutes * 60)).await;
    }
}

/// Pulls the catalog feed and publishes the merged catalog atomically.
/// Returns `false` when the refresh failed and the cycle should be retried.
async fn refresh_catalog(context: &super::AppContextHandle) -> bool {
    let session = {
        let state = context.state.read().await;
        state.session.clone()
    };
    let Some(session) = session else {
        return true;
    };

    match session.fetch_catalog().await {
        Ok(entries) => {
            let mut state = context.state.write().await;
            let merged = Catalog::from_feed(entries, &state.catalog);
            state.catalog = merged;
            let crate::state::State { catalog, slots, .. } = &mut *state;
            slots.rebuild(catalog);
            true
        }
        Err(e) => {
            context.notify(NotificationType::Error, "Failed").await;
            context.notify(NotificationType::Error, e.to_string()).await;
            false
        }
    }
}
