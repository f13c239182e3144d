use std::path::PathBuf;

/// Error type for loading an interview definition.
///
/// Definition errors are fatal: no engine is constructed from a definition
/// that failed to load.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The definition file could not be read.
    #[error("Failed to read definition {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition source is empty or whitespace only.
    #[error("Empty definition source")]
    Empty,

    /// The definition source is not valid YAML for a definition.
    #[error("Invalid definition YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The definition source is not valid JSON for a definition.
    #[error("Invalid definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition has no questions.
    #[error("no questions")]
    NoQuestions,
}

impl DefinitionError {
    /// Check if this error means the definition had no questions.
    pub fn is_no_questions(&self) -> bool {
        matches!(self, Self::NoQuestions)
    }
}
