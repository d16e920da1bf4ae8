//! Application context and message dispatching utilities.
//!
//! The context contains the shared state, the snapshot store, the journal,
//! and the rotation controller, and provides helpers for sending responses
//! and notifications back to the control-surface bridge.

use std::sync::Arc;

use badgewheel_bridge::{MessageFromBackend, MessageToBackend, notification::NotificationType};
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::{Mutex, watch};

use crate::journal::Journal;
use crate::rotation::RotationController;
use crate::services;
use crate::state::SharedState;
use crate::store::SnapshotStore;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Snapshot store rooted at the data directory.
    pub store: SnapshotStore,
    /// Bounded notification journal.
    pub journal: Journal,
    /// Owner of the active preset rotation, if any. The mutex serializes
    /// start requests so cancel-then-spawn never races.
    pub rotation: Mutex<RotationController>,
    /// Flips to true once a remote session exists; gates the randomize loop.
    pub ready: watch::Sender<bool>,
    /// Outbound channel to the control-surface bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch commands from the control-surface bridge until it
    /// closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a control-surface command: {message:?}");
            self.dispatch_message(message).await;
        }
    }

    /// Dispatches the received command down to individual service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::LoginRequest { username, password } => {
                services::session_service::handle_login(self.clone(), username, password).await;
            }
            MessageToBackend::SubmitSelection(submission) => {
                services::selection_service::handle_submit_selection(self.clone(), submission)
                    .await;
            }
            MessageToBackend::SavePreset(name) => {
                services::preset_service::handle_save_preset(self.clone(), name).await;
            }
            MessageToBackend::StartRotation(names) => {
                services::preset_service::handle_start_rotation(self.clone(), names).await;
            }
            MessageToBackend::SetInterval(minutes) => {
                services::config_service::handle_set_interval(self.clone(), minutes).await;
            }
            MessageToBackend::RandomizeNow => {
                services::randomize_service::handle_randomize_now(self.clone()).await;
            }
            MessageToBackend::CategoryIndexRequest => {
                services::selection_service::handle_category_index_request(self.clone()).await;
            }
            MessageToBackend::PresetListRequest => {
                services::preset_service::handle_preset_list_request(self.clone()).await;
            }
            MessageToBackend::JournalRequest => {
                services::journal_service::handle_journal_request(self.clone()).await;
            }
            MessageToBackend::PostNotification(message) => {
                services::journal_service::handle_post_notification(self.clone(), message).await;
            }
        }
    }

    /// Send an event to the control-surface bridge. A closed bridge is not
    /// fatal to the backend; the event is dropped and logged.
    pub async fn send(&self, message: MessageFromBackend) {
        if self.tx.send(message).await.is_err() {
            log::debug!("control surface is gone; dropping event");
        }
    }

    /// Records a message in the journal and forwards it to the control
    /// surface as a notification.
    pub async fn notify(&self, notification_type: NotificationType, content: impl Into<String>) {
        let message = content.into();
        self.journal.record(message.as_str());
        self.send(MessageFromBackend::NotificationMessage(
            badgewheel_bridge::notification::NotificationMessage {
                notification_type,
                message,
            },
        ))
        .await;
    }

    /// Rejects an invalid command at the boundary; core state is untouched
    /// and nothing is journaled.
    pub async fn reject(&self, reason: impl Into<String>) {
        self.send(MessageFromBackend::CommandRejected {
            reason: reason.into(),
        })
        .await;
    }
}
