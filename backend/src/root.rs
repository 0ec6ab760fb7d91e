use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::error::AppError;

pub const DEFAULT_TARGET_DIRECTORY: &str = "./arquivos";

/// Resolves the directory served by the backend, creating it when missing.
///
/// `configured` is the value of `TARGET_DIRECTORY`; `None` falls back to
/// [`DEFAULT_TARGET_DIRECTORY`]. The result is absolute and canonical, so every
/// later containment check compares against the same spelling of the root.
/// Calling it again for an existing directory is a no-op apart from the lookup.
pub fn resolve_root(configured: Option<&Path>) -> Result<PathBuf, AppError> {
    let requested = configured.unwrap_or_else(|| Path::new(DEFAULT_TARGET_DIRECTORY));

    fs::create_dir_all(requested)?;
    let root = fs::canonicalize(requested)?;

    info!(root = %root.display(), "serving directory resolved");
    Ok(root)
}
