use badgewheel_bridge::MessageFromBackend;
use badgewheel_bridge::notification::NotificationType;

/// Handles a journal read request (see
/// [`badgewheel_bridge::MessageToBackend::JournalRequest`]).
pub async fn handle_journal_request(context: super::AppContextHandle) {
    context
        .send(MessageFromBackend::JournalResponse(
            context.journal.recent(),
        ))
        .await;
}

/// Handles an operator-posted notification (see
/// [`badgewheel_bridge::MessageToBackend::PostNotification`]).
pub async fn handle_post_notification(context: super::AppContextHandle, message: String) {
    context.notify(NotificationType::Info, message).await;
}
