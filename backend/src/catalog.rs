use std::{
    fs, io,
    path::Path,
    time::SystemTime,
};

use chrono::{DateTime, Local, Timelike};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{error::AppError, models::files::FileRecord};

const OCTET_STREAM: &str = "application/octet-stream";

/// Builds the record for a single regular file below `root`.
pub fn describe(path: &Path, root: &Path) -> Result<FileRecord, AppError> {
    let metadata = fs::metadata(path).map_err(io_error)?;

    let name = path
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileRecord {
        mime_type: guess_mime(&name),
        size_bytes: metadata.len(),
        created_at: format_timestamp(created_time(&metadata)?),
        modified_at: format_timestamp(metadata.modified().map_err(io_error)?),
        subdirectory: subdirectory_of(path, root),
        name,
    })
}

/// Walks `root` recursively and describes every plain file found.
///
/// Directories, symlinks and special files are not reported. Entries are
/// sorted by file name within each directory. Failing to open the root aborts
/// the listing; unreadable subdirectories and files that disappear before they
/// can be described are skipped.
pub fn list_all(root: &Path) -> Result<Vec<FileRecord>, AppError> {
    let root_metadata = fs::metadata(root).map_err(io_error)?;
    if !root_metadata.is_dir() {
        return Err(io_error(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} is not a directory", root.display()),
        )));
    }

    let mut records = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(io_error(io::Error::from(err))),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match describe(entry.path(), root) {
            Ok(record) => records.push(record),
            Err(AppError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %entry.path().display(), "file vanished during listing");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(records)
}

fn guess_mime(name: &str) -> String {
    mime_guess::from_path(name)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

fn subdirectory_of(path: &Path, root: &Path) -> String {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|relative| relative.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}

// Birth time is not tracked everywhere; Unix falls back to the inode change
// time, anything else to the modification time.
fn created_time(metadata: &fs::Metadata) -> Result<SystemTime, AppError> {
    if let Ok(created) = metadata.created() {
        return Ok(created);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        use std::time::{Duration, UNIX_EPOCH};

        if let (Ok(secs), Ok(nanos)) = (
            u64::try_from(metadata.ctime()),
            u32::try_from(metadata.ctime_nsec()),
        ) {
            return Ok(UNIX_EPOCH + Duration::new(secs, nanos));
        }
    }

    metadata.modified().map_err(io_error)
}

/// Local time without offset, microseconds only when present.
fn format_timestamp(time: SystemTime) -> String {
    let local = DateTime::<Local>::from(time).naive_local();
    if local.nanosecond() / 1_000 == 0 {
        local.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        local.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

fn io_error(err: io::Error) -> AppError {
    AppError::Io(err)
}
