//! Session state persisted between runs: only the last rendered place name.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::WeatherError;

const SESSION_FILE: &str = "session.json";

/// State carried into and out of every update cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Display name of the last successfully rendered place
    #[serde(default)]
    pub last_place: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved session. A missing or unreadable file starts fresh.
    pub fn load(&self) -> SessionState {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return SessionState::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read session file {}: {}", self.path.display(), e);
                return SessionState::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                SessionState::default()
            }
        }
    }

    pub fn save(&self, state: &SessionState) -> Result<(), WeatherError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WeatherError::Storage(e.to_string()))?;
        }
        let contents =
            serde_json::to_string_pretty(state).map_err(|e| WeatherError::Storage(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| WeatherError::Storage(e.to_string()))
    }
}
