//! Snapshot store behavior against a real (temporary) data directory.

use badgewheel_backend::journal::Journal;
use badgewheel_backend::store::{CURRENT_SELECTION_FILE, Snapshot, SnapshotStore};
use badgewheel_bridge::catalog::Item;

fn sample_snapshot() -> Snapshot {
    let mut a = Item::new("A", "Games", "/img/a.png");
    a.selected[0] = true;
    let b = Item::new("B", "", "/img/b.png");
    Snapshot::from([("A".to_string(), a), ("B".to_string(), b)])
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SnapshotStore::new(dir.path().to_path_buf());

    let snapshot = sample_snapshot();
    store
        .save(CURRENT_SELECTION_FILE, &snapshot)
        .await
        .expect("save");

    let loaded = store.load(CURRENT_SELECTION_FILE).await.expect("load");
    assert_eq!(loaded, Some(snapshot));
}

#[tokio::test]
async fn missing_file_reads_as_empty_without_journal_noise() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SnapshotStore::new(dir.path().to_path_buf());
    let journal = Journal::new();

    let snapshot = store.load_or_empty("selected.json", &journal).await;
    assert!(snapshot.is_empty());
    assert!(journal.is_empty());
}

#[tokio::test]
async fn malformed_file_reads_as_empty_and_journals_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(CURRENT_SELECTION_FILE), b"{not json").expect("write");

    let store = SnapshotStore::new(dir.path().to_path_buf());
    let journal = Journal::new();

    let snapshot = store.load_or_empty(CURRENT_SELECTION_FILE, &journal).await;
    assert!(snapshot.is_empty());
    assert_eq!(journal.len(), 1);
    assert!(journal.recent()[0].message.contains("file format"));
}

#[tokio::test]
async fn preset_listing_strips_prefix_and_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SnapshotStore::new(dir.path().to_path_buf());
    let snapshot = sample_snapshot();

    store
        .save(&SnapshotStore::preset_file("weekend"), &snapshot)
        .await
        .expect("save");
    store
        .save(&SnapshotStore::preset_file("con"), &snapshot)
        .await
        .expect("save");
    store
        .save(CURRENT_SELECTION_FILE, &snapshot)
        .await
        .expect("save");

    assert_eq!(
        store.list_presets().await,
        vec!["con".to_string(), "weekend".to_string()]
    );
}

#[tokio::test]
async fn resaving_a_preset_overwrites_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SnapshotStore::new(dir.path().to_path_buf());

    store
        .save(&SnapshotStore::preset_file("p"), &sample_snapshot())
        .await
        .expect("save");
    let replacement = Snapshot::new();
    store
        .save(&SnapshotStore::preset_file("p"), &replacement)
        .await
        .expect("resave");

    let loaded = store
        .load(&SnapshotStore::preset_file("p"))
        .await
        .expect("load");
    assert_eq!(loaded, Some(replacement));
}
