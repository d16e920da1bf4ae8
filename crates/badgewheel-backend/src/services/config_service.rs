use badgewheel_bridge::notification::NotificationType;

/// Handles an interval update (see
/// [`badgewheel_bridge::MessageToBackend::SetInterval`]).
///
/// Takes effect on the next scheduler sleep; the updated value is persisted
/// so it is remembered across runs.
pub async fn handle_set_interval(context: super::AppContextHandle, minutes: u64) {
    if minutes == 0 {
        context.reject("Interval must be at least one minute").await;
        return;
    }

    let config = {
        let mut state = context.state.write().await;
        state.config.interval_minutes = minutes;
        state.config.clone()
    };
    if let Err(e) = crate::config::save_config(&config).await {
        context
            .notify(
                NotificationType::Warning,
                format!("Interval set but not saved: {e}"),
            )
            .await;
        return;
    }
    context
        .notify(
            NotificationType::Info,
            format!("Randomization interval set to {minutes} minute(s)"),
        )
        .await;
}
