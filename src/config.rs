use std::path::PathBuf;

use crate::insight::types::Coordinates;
use crate::store::StateStore;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Runtime configuration. A missing API key is a recognized condition, not
/// an error — insight fetches are simply skipped.
#[derive(Debug, Clone)]
pub struct BriefConfig {
    pub state_path: PathBuf,
    pub api_key: Option<String>,
    /// Coordinates pinned by the user, bypassing geolocation.
    pub coordinates: Option<Coordinates>,
    /// Bounded wait for the geolocation capability, in seconds.
    pub geolocation_timeout_secs: u64,
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self {
            state_path: StateStore::default_path(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            coordinates: None,
            geolocation_timeout_secs: 5,
        }
    }
}

impl BriefConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }
}
