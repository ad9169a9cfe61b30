use std::path::{Path, PathBuf};

use crate::core::state::AppState;

/// Persists the full [`AppState`] as one JSON file.
///
/// Every save writes the complete snapshot — no deltas, no debouncing.
/// A failed write is logged and not retried; a missing or unreadable
/// snapshot loads as the empty default. Concurrent writers are not
/// coordinated: last writer wins.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("daybrief")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state, falling back to the empty default on a
    /// missing file or malformed content. Never fails the caller.
    pub fn load(&self) -> AppState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No saved state at {}, starting empty", self.path.display());
                return AppState::default();
            }
            Err(e) => {
                log::warn!("Failed to read state from {}: {}", self.path.display(), e);
                return AppState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!(
                    "Discarding malformed state at {}: {}",
                    self.path.display(),
                    e
                );
                AppState::default()
            }
        }
    }

    /// Write the full snapshot. Failures are logged, not surfaced.
    pub fn save(&self, state: &AppState) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create {}: {}", parent.display(), e);
                return;
            }
        }

        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize state: {}", e);
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, json) {
            log::error!("Failed to write state to {}: {}", self.path.display(), e);
        }
    }
}
