//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge commands to services,
//! and manages the shared assignment state: the badge catalog, the per-slot
//! candidate pools, the snapshot store, the rotation scheduler, and the
//! randomize-and-sync engine.

mod app;
mod config;
mod runtime;
mod services;
mod state;

pub mod catalog;
pub mod journal;
pub mod randomize;
pub mod rotation;
pub mod selection;
pub mod slots;
pub mod store;

pub use crate::runtime::run;
