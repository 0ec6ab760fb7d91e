//! HTTP backend that publishes one directory tree: a recursive listing with
//! per-file metadata and traversal-safe downloads of individual files.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod paths;
pub mod root;
pub mod routes;

use std::path::PathBuf;

/// Shared, read-only request state.
pub struct AppState {
    /// Canonical served root, fixed at startup.
    pub root: PathBuf,
}
