//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, the background
//! randomize loop, and the message dispatch loop that listens to
//! control-surface bridge commands.

use std::{sync::Arc, thread};

use badgewheel_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::{
    Mutex, RwLock,
    mpsc::{Receiver, Sender},
    watch,
};

use crate::app::AppContext;
use crate::catalog::Catalog;
use crate::journal::Journal;
use crate::rotation::RotationController;
use crate::slots::SlotTable;
use crate::state::State;
use crate::store::{CURRENT_SELECTION_FILE, SnapshotStore};

/// Initialize backend state and start processing control-surface commands.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let (config, data_dir) = crate::config::load_config()
        .await
        .expect("failed to load config");
    // The data directory is the one resource we cannot run without.
    tokio::fs::create_dir_all(&data_dir)
        .await
        .expect("failed to create data directory");

    let journal = Journal::new();
    let store = SnapshotStore::new(data_dir.clone());

    // Restore the selection from the previous run; any failure downgrades to
    // an empty catalog plus a journal entry.
    let snapshot = store.load_or_empty(CURRENT_SELECTION_FILE, &journal).await;
    let catalog = Catalog::from_snapshot(snapshot);
    let mut slots = SlotTable::new();
    slots.rebuild(&catalog);

    let state = Arc::new(RwLock::new(State {
        config,
        data_dir,
        catalog,
        slots,
        session: None,
    }));

    let (ready_tx, ready_rx) = watch::channel(false);
    let context = Arc::new(AppContext {
        state,
        store,
        journal,
        rotation: Mutex::new(RotationController::new()),
        ready: ready_tx,
        tx,
    });

    // The randomize loop parks on the ready gate until a login succeeds.
    tokio::spawn(crate::services::randomize_service::randomize_loop(
        context.clone(),
        ready_rx,
    ));

    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge commands.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_backend(rx, tx).await });
    });
}
