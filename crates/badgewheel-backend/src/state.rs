/// The core application state that holds the catalog, the slot table, the
/// configuration, and the remote session.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application: web-triggered service handlers, the preset
/// rotation loop, and the background randomize loop all read and write it.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) to allow safe concurrent reads and
/// occasional writes from multiple tasks. The catalog is replaced wholesale
/// under the write lock rather than mutated in place, so readers always get
/// a consistent snapshot.
#[derive(Debug, Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: badgewheel_bridge::config::Config,
    /// Path to the directory holding snapshot files across runs.
    pub data_dir: std::path::PathBuf,
    /// The badge catalog, including per-item selection vectors.
    pub catalog: crate::catalog::Catalog,
    /// The fixed slot table with derived candidate pools.
    pub slots: crate::slots::SlotTable,
    /// Logged-in remote session, once the operator has authenticated.
    pub session: Option<badgewheel_remote::HttpSession>,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
///
/// This is the recommended way to pass state into async handlers, background
/// tasks, or any context where multiple tasks need read access (and occasional
/// write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
