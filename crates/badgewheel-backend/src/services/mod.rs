//! Backend service handlers for control-surface commands.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network, filesystem), and emit
//! responses or notifications back to the control surface.

pub mod config_service;
pub mod journal_service;
pub mod preset_service;
pub mod randomize_service;
pub mod selection_service;
pub mod session_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
