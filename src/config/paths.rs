use crate::constants::storage::DATA_DIR_NAME;
use std::path::{Path, PathBuf};

fn app_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(DATA_DIR_NAME)
}

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    app_config_dir()
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    app_config_dir().join("logs").to_string_lossy().to_string()
}

/// Returns the default directory for the persisted scoreboard snapshots.
///
/// Uses the platform data directory (e.g., ~/.local/share on Linux) and falls
/// back to the config directory, then the current directory.
pub fn get_data_dir_path() -> String {
    dirs::data_dir()
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(DATA_DIR_NAME)
        .join("store")
        .to_string_lossy()
        .to_string()
}
