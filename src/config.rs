//! Runtime configuration: where the store file lives.
//!
//! Resolution order for the data directory:
//! 1. `MIMIR_DATA_DIR` environment variable
//! 2. platform data directory joined with `mimir`
//!    - macOS: `~/Library/Application Support/mimir/`
//!    - Linux: `~/.local/share/mimir/`
//!    - Windows: `%APPDATA%\mimir\`

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DATA_DIR_ENV: &str = "MIMIR_DATA_DIR";
pub const STORE_FILENAME: &str = "store.json";
const APP_DIR_NAME: &str = "mimir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store_file: PathBuf,
}

impl Config {
    /// Resolve configuration from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_data_dir(get_data_dir()?))
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        let store_file = data_dir.join(STORE_FILENAME);
        Self { data_dir, store_file }
    }
}

/// Get the directory holding the store file
pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir() {
        let config = Config::with_data_dir(PathBuf::from("/tmp/mimir-test"));
        assert_eq!(config.store_file, PathBuf::from("/tmp/mimir-test/store.json"));
    }

    #[test]
    fn test_get_data_dir_env_override() {
        // Save original value
        let original = env::var_os(DATA_DIR_ENV);

        // SAFETY: this is the only test touching MIMIR_DATA_DIR and it restores the value
        unsafe {
            env::set_var(DATA_DIR_ENV, "/srv/mimir-data");
        }

        let dir = get_data_dir().unwrap();
        assert_eq!(dir, PathBuf::from("/srv/mimir-data"));
        let config = Config::from_env().unwrap();
        assert_eq!(config.store_file, PathBuf::from("/srv/mimir-data/store.json"));

        // Restore original value
        unsafe {
            match original {
                Some(value) => env::set_var(DATA_DIR_ENV, value),
                None => env::remove_var(DATA_DIR_ENV),
            }
        }
    }
}
