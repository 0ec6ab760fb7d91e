use std::{env, path::PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Raw `TARGET_DIRECTORY`; `None` lets the root resolver apply its default.
    pub target_directory: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid SERVER_PORT: {err}")))?;

        let target_directory = env::var_os("TARGET_DIRECTORY")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let log_dir =
            PathBuf::from(env::var("ARQUIVOS_LOG_DIR").unwrap_or_else(|_| "./log".into()));

        Ok(Self {
            host,
            port,
            target_directory,
            log_dir,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
