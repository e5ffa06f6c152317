mod config;
pub mod entries;

pub use config::{Config, LogConfig, StoreConfig, StreakConfig};
pub use entries::EntryStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `DREAMAI_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/dreamai[-dev]/`, with `DREAMAI_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DREAMAI_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DREAMAI_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dreamai-dev")
            } else {
                base_dir.join("dreamai")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
