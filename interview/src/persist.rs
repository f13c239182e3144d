//! Snapshot persistence and share codes.
//!
//! Persistence never blocks an interview: loading a missing, unreadable or
//! corrupt snapshot logs the problem and reports "no saved state".

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use interview_types::{Answers, InterviewState, StateSnapshot};
use serde::{Deserialize, Serialize};

/// Error type for saving and restoring snapshots.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid share code: {0}")]
    Decode(String),
}

/// A place where the interview state is kept between sessions.
pub trait StateStore {
    /// Persist the full state.
    fn save(&mut self, state: &InterviewState) -> Result<(), PersistError>;

    /// Load the saved snapshot. Failures are logged and yield `None`.
    fn load(&self) -> Option<StateSnapshot>;

    /// Remove the saved snapshot.
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// Stores the snapshot as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for FileStore {
    fn save(&mut self, state: &InterviewState) -> Result<(), PersistError> {
        let json = StateSnapshot::from(state).to_json()?;
        std::fs::write(&self.path, json).map_err(|err| self.io_error(err))
    }

    fn load(&self) -> Option<StateSnapshot> {
        let source = match std::fs::read_to_string(&self.path) {
            Ok(source) => source,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                log::error!("Failed to load saved state: {}", self.io_error(err));
                return None;
            }
        };
        parse_snapshot(&source)
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(self.io_error(err)),
            _ => Ok(()),
        }
    }
}

/// Keeps the serialized snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding raw snapshot text, as if it had been saved earlier.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            saved: Some(contents.into()),
        }
    }

    /// Get the raw saved text.
    pub fn contents(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, state: &InterviewState) -> Result<(), PersistError> {
        self.saved = Some(StateSnapshot::from(state).to_json()?);
        Ok(())
    }

    fn load(&self) -> Option<StateSnapshot> {
        self.saved.as_deref().and_then(parse_snapshot)
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.saved = None;
        Ok(())
    }
}

fn parse_snapshot(source: &str) -> Option<StateSnapshot> {
    match StateSnapshot::from_json(source) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            log::error!("Failed to load saved state: {}", PersistError::from(err));
            None
        }
    }
}

/// The compact form carried by share codes.
#[derive(Debug, Serialize, Deserialize)]
struct SharedState {
    #[serde(default)]
    a: Option<Answers>,
    #[serde(default)]
    c: Option<usize>,
    #[serde(default)]
    v: Option<Vec<usize>>,
}

/// Encode the answers and navigation of `state` as a URL-safe share code.
///
/// The completed flag is not part of the code.
pub fn share_code(state: &InterviewState) -> Result<String, PersistError> {
    let shared = SharedState {
        a: Some(state.answers.clone()),
        c: Some(state.current_question_index),
        v: Some(state.visited_questions.clone()),
    };
    let json = serde_json::to_string(&shared)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a share code into a snapshot.
///
/// Missing parts default to no answers, index 0 and no history. The snapshot
/// never carries a completed flag. Invalid codes are logged and yield `None`.
pub fn restore_share_code(code: &str) -> Option<StateSnapshot> {
    match decode_share_code(code) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            log::error!("Failed to restore shared state: {err}");
            None
        }
    }
}

fn decode_share_code(code: &str) -> Result<StateSnapshot, PersistError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(code.trim())
        .map_err(|err| PersistError::Decode(err.to_string()))?;
    let json = String::from_utf8(bytes).map_err(|err| PersistError::Decode(err.to_string()))?;
    let shared: SharedState = serde_json::from_str(&json)?;
    Ok(StateSnapshot {
        answers: Some(shared.a.unwrap_or_default()),
        current_question_index: Some(shared.c.unwrap_or_default()),
        visited_questions: Some(shared.v.unwrap_or_default()),
        completed: None,
    })
}
