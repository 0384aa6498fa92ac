//! Store persistence: load on start, atomic save after every mutation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::state::AppState;

/// Store schema version; files written with another version are discarded
pub const STORE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a AppState,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    state: AppState,
}

/// Load the state stored at `path`
///
/// Returns None if the file is missing, corrupted or written by another
/// store version (caller should start from defaults). An unusable file is
/// moved to `<file>.bak` first, so the next save does not overwrite it.
pub fn load_state(path: &Path) -> Result<Option<AppState>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store file {}", path.display()))?;

    let envelope: Envelope = match serde_json::from_str(&json) {
        Ok(envelope) => envelope,
        Err(e) => {
            let backup = back_up(path)?;
            warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %e,
                "store file is corrupted, starting fresh"
            );
            return Ok(None);
        }
    };

    if envelope.version != STORE_VERSION {
        let backup = back_up(path)?;
        warn!(
            expected = STORE_VERSION,
            found = envelope.version,
            backup = %backup.display(),
            "store version mismatch, starting fresh"
        );
        return Ok(None);
    }

    Ok(Some(envelope.state))
}

/// Move an unusable store file aside, replacing any older backup
fn back_up(path: &Path) -> Result<PathBuf> {
    let backup = sibling_with_suffix(path, ".bak");
    fs::rename(path, &backup)
        .with_context(|| format!("Failed to back up store file to {}", backup.display()))?;
    Ok(backup)
}

/// Save state atomically (temp file + rename), creating parent directories
pub fn save_state(path: &Path, state: &AppState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create store directory")?;
    }

    let json = serde_json::to_string_pretty(&EnvelopeRef { version: STORE_VERSION, state })
        .context("Failed to serialize store")?;

    let temp_path = sibling_with_suffix(path, ".tmp");
    fs::write(&temp_path, json).context("Failed to write store temp file")?;
    fs::rename(&temp_path, path).context("Failed to rename store temp file")?;

    debug!(path = %path.display(), chats = state.chats.len(), "store saved");
    Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Application state bound to its file on disk
///
/// Reads go through [`Store::state`]; every change goes through
/// [`Store::update`], which persists the result before returning.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    state: AppState,
}

impl Store {
    /// Open the store at `path`, falling back to defaults when nothing usable is there
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match load_state(&path)? {
            Some(state) => {
                info!(path = %path.display(), chats = state.chats.len(), "store loaded");
                state
            }
            None => AppState::default(),
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply a mutation and save
    ///
    /// The state is saved even when the closure returns an error, since it may
    /// have changed before failing; the closure's error is returned after.
    pub fn update<T>(&mut self, mutate: impl FnOnce(&mut AppState) -> Result<T>) -> Result<T> {
        let result = mutate(&mut self.state);
        self.save()?;
        result
    }

    pub fn save(&self) -> Result<()> {
        save_state(&self.path, &self.state)
    }
}
