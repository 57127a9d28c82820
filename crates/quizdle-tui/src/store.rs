//! Persisted authoring session.
//!
//! The fetched candidate layouts and the paging index survive restarts so
//! the user can keep paging through previously fetched layouts without
//! re-requesting them; the in-progress draft rides along. The whole file is
//! overwritten on the next successful generation.

use quizdle_core::{CandidateSet, PuzzleDraft};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Everything the session file holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub draft: PuzzleDraft,
    #[serde(default)]
    pub candidates: CandidateSet,
}

/// File-backed session storage.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the platform data directory.
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    /// Store at an explicit path (CLI override, tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizdle_session.json")
    }

    /// Load the session; a missing or corrupt file is an empty session.
    pub fn load(&self) -> SessionState {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => SessionState::default(),
        }
    }

    /// Persist the session, replacing the previous contents.
    pub fn save(&self, state: &SessionState) {
        if let Ok(json) = serde_json::to_string_pretty(state) {
            let _ = fs::write(&self.path, json);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
