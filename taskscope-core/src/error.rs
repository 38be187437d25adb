use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving, or validating pattern tables
#[derive(Error, Debug)]
pub enum PatternsError {
    #[error("Failed to read pattern file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pattern file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write pattern file {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern tables: {0}")]
    Validation(String),

    #[error("Home directory could not be determined")]
    NoHomeDir,
}

/// Errors surfaced by the analysis entry points
///
/// Degenerate inputs (empty text, no qualifying sentences) are not errors;
/// they produce a well-formed report with sentinel entries.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Analysis context must be a JSON object, got {0}")]
    InvalidContext(String),

    #[error(transparent)]
    Patterns(#[from] PatternsError),
}
