//! Communication bridge between the control surface and the backend.
//!
//! This crate defines the types and protocols used to connect an operator
//! control surface (typically a local web page) with the asynchronous backend
//! that owns the badge catalog, the slot assignments, and the rotation
//! scheduler.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The control surface sends commands (e.g., submit a selection, save a
//!   preset, trigger a randomize pass).
//! - The backend pushes events (e.g., the category index, the recent
//!   notification journal, rejection notices).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod catalog;
pub mod config;
pub mod notification;

use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::catalog::{Item, SlotNumber};
use crate::notification::NotificationEntry;

/// Messages emitted by the backend to inform the control surface of state
/// updates.
///
/// These are typically sent in response to control-surface commands or to
/// push asynchronous events (e.g., sync outcomes, degraded-operation
/// notices).
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all user-visible notifications.
    NotificationMessage(notification::NotificationMessage),
    /// The catalog grouped by category, for rendering the selection page.
    CategoryIndexResponse(BTreeMap<String, Vec<Item>>),
    /// Names of the presets currently available on disk.
    PresetListResponse(Vec<String>),
    /// The recent notification journal, newest first.
    JournalResponse(Vec<NotificationEntry>),
    /// A command was rejected at the boundary; core state is untouched.
    CommandRejected { reason: String },
}

/// Commands issued by the control surface to control or query the backend.
///
/// These messages drive the core functionality of the application.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Log into the remote assignment service with the given credentials.
    /// A successful login releases the background randomize loop.
    LoginRequest { username: String, password: String },
    /// Replace the candidate pools: for each slot, the set of item ids the
    /// operator checked for it.
    SubmitSelection(BTreeMap<SlotNumber, BTreeSet<String>>),
    /// Persist the current selection under the given preset name.
    SavePreset(String),
    /// Start rotating through the named presets, in order, wrapping forever.
    /// Replaces any rotation already in flight.
    StartRotation(Vec<String>),
    /// Set the randomize/rotation interval, in minutes.
    SetInterval(u64),
    /// Run one randomize-and-sync pass immediately.
    RandomizeNow,
    /// Request the category index for the selection page.
    CategoryIndexRequest,
    /// Request the list of available preset names.
    PresetListRequest,
    /// Request the recent notification journal.
    JournalRequest,
    /// Append an operator-supplied message to the notification journal.
    PostNotification(String),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// the control surface and the backend.
pub struct BridgeChannels {
    /// Receiver used by the control surface to get events from the backend.
    pub surface_rx: Receiver<MessageFromBackend>,
    /// Sender used by the control surface to send commands to the backend.
    pub surface_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the control surface.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the surface.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_surface_tx, to_surface_rx) = mpsc::channel(buffer);
        Self {
            surface_tx: to_backend_tx,
            surface_rx: to_surface_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_surface_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
