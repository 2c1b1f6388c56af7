//! Application Configuration
//!
//! Where state and logs live. Defaults follow the platform data directory;
//! environment variables override them.

use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "startpage";
pub const DATA_DIR_ENV: &str = "STARTPAGE_DATA_DIR";
pub const LOG_DIR_ENV: &str = "STARTPAGE_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// One JSON file per stored blob
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub app_name: String,
}

impl AppConfig {
    /// Everything under `data_dir`, logs in `data_dir/logs`
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            log_dir: data_dir.join("logs"),
            data_dir,
            app_name: APP_NAME.to_string(),
        }
    }

    /// Platform defaults with `STARTPAGE_DATA_DIR` / `STARTPAGE_LOG_DIR` applied
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
        )
    }

    fn resolve(data_override: Option<PathBuf>, log_override: Option<PathBuf>) -> Self {
        let data_dir = data_override.unwrap_or_else(default_data_dir);
        let mut config = Self::in_dir(data_dir);
        if let Some(log_dir) = log_override {
            config.log_dir = log_dir;
        }
        config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

fn default_data_dir() -> PathBuf {
    let mut root = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    root.push(APP_NAME);
    root
}
