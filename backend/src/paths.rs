use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::warn;

use crate::error::AppError;

/// Maps a caller-supplied relative path to a regular file inside `root`.
///
/// `root` must already be canonical (see [`crate::root::resolve_root`]). The
/// joined path is resolved first, then checked for containment segment by
/// segment, and only then checked for existence. A path that escapes the root
/// is therefore reported as invalid even when its target does not exist.
pub fn resolve_for_download(root: &Path, relative_path: &str) -> Result<PathBuf, AppError> {
    let resolved = resolve_lenient(&root.join(relative_path));

    if !resolved.starts_with(root) {
        warn!(
            requested = relative_path,
            resolved = %resolved.display(),
            "rejected path outside served root"
        );
        return Err(AppError::InvalidPath(relative_path.to_string()));
    }

    match fs::metadata(&resolved) {
        Ok(metadata) if metadata.is_file() => Ok(resolved),
        Ok(_) => Err(AppError::NotFound(resolved)),
        Err(err) if is_missing(&err) => Err(AppError::NotFound(resolved)),
        Err(err) => Err(AppError::Io(err)),
    }
}

/// Canonicalizes `path`, tolerating a tail that cannot be resolved.
fn resolve_lenient(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| resolve_existing_prefix(path))
}

// Symlinks are resolved for every prefix that exists; the rest is applied
// lexically.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(segment) => {
                resolved.push(segment);
                if let Ok(canonical) = fs::canonicalize(&resolved) {
                    resolved = canonical;
                }
            }
        }
    }
    resolved
}

// Looping links and over-long names can never name a servable file.
fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound
            | io::ErrorKind::NotADirectory
            | io::ErrorKind::FilesystemLoop
            | io::ErrorKind::InvalidFilename
    )
}
