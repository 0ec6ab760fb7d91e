use std::{fs, path::Path};

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

pub const LOG_FILE_NAME: &str = "backend.log";

/// Installs console and `backend.log` output filtered by `RUST_LOG` (default `info`).
///
/// The returned guard flushes the file writer on drop and must be held for the
/// life of the process.
pub fn init_tracing(log_dir: &Path) -> Result<WorkerGuard, AppError> {
    fs::create_dir_all(log_dir)?;
    let file_appender = rolling::never(log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|err| AppError::Config(format!("invalid log filter: {err}")))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .map_err(|err| AppError::Config(format!("logging already initialised: {err}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_log_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let log_dir = temp.path().join("nested/log");

        let guard = init_tracing(&log_dir).unwrap();
        tracing::info!("logging ready");
        drop(guard);

        assert!(log_dir.join(LOG_FILE_NAME).is_file());
    }
}
