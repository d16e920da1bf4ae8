//! File-backed snapshot store with single-writer exclusivity.
//!
//! One JSON file per named snapshot: the reserved current-selection file plus
//! any number of operator-saved presets. Every load or save first takes the
//! store's exclusivity token, so at most one operation touches the backing
//! files at a time; the token is a scoped guard and is released on every exit
//! path, error paths included.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use badgewheel_bridge::catalog::Item;
use tokio::sync::Mutex;

use crate::journal::Journal;

/// The persisted unit: item id to item record, selection vectors included.
pub type Snapshot = HashMap<String, Item>;

/// Reserved file name for the live current selection.
pub const CURRENT_SELECTION_FILE: &str = "selected.json";

const PRESET_PREFIX: &str = "preset-";
const SNAPSHOT_EXT: &str = ".json";

/// Errors produced by snapshot file operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access snapshot file: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Snapshot store rooted at the application data directory.
#[derive(Debug)]
pub struct SnapshotStore {
    dir: PathBuf,
    // Exclusivity token for the backing files; see module docs.
    token: Mutex<()>,
}

impl SnapshotStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            token: Mutex::new(()),
        }
    }

    /// File name a preset is stored under.
    pub fn preset_file(name: &str) -> String {
        format!("{PRESET_PREFIX}{name}{SNAPSHOT_EXT}")
    }

    /// Loads a snapshot by file name. A missing file is not an error; it
    /// reads as "no snapshot".
    pub async fn load(&self, file: &str) -> Result<Option<Snapshot>, StoreError> {
        let _token = self.token.lock().await;
        let path = self.dir.join(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(Some(snapshot))
    }

    /// Loads a snapshot, downgrading every failure mode to an empty snapshot.
    /// Unreadable or malformed files produce exactly one journal entry; a
    /// missing file is silent.
    pub async fn load_or_empty(&self, file: &str, journal: &Journal) -> Snapshot {
        match self.load(file).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => Snapshot::new(),
            Err(StoreError::Io(e)) => {
                journal.record(format!("Error reading file {file}: {e}"));
                Snapshot::new()
            }
            Err(StoreError::Malformed(e)) => {
                journal.record(format!("Error in file format of {file}: {e}"));
                Snapshot::new()
            }
        }
    }

    /// Writes a snapshot under the given file name, overwriting any previous
    /// content.
    pub async fn save(&self, file: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        let _token = self.token.lock().await;
        let bytes = serde_json::to_vec(snapshot)?;
        tokio::fs::write(self.dir.join(file), bytes).await?;
        Ok(())
    }

    /// Names of the presets currently on disk, sorted. Directory read
    /// failures read as "no presets".
    pub async fn list_presets(&self) -> Vec<String> {
        let _token = self.token.lock().await;
        let mut names = Vec::new();
        let Ok(mut entries) = tokio::fs::read_dir(&self.dir).await else {
            return names;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let file = entry.file_name();
            let Some(file) = file.to_str() else { continue };
            if let Some(stem) = file
                .strip_prefix(PRESET_PREFIX)
                .and_then(|rest| rest.strip_suffix(SNAPSHOT_EXT))
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        names
    }
}
