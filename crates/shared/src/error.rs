//! Error types shared across crates.

use std::path::PathBuf;

/// Failure reading or writing persisted preferences.
///
/// These never reach the end user; callers log them and fall back to
/// defaults.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Failed to read preferences from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write preferences to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed preference entry '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode preference entry '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
