//! Error types for writing the output artifacts

use std::path::PathBuf;
use thiserror::Error;

/// Writer errors; all of them are fatal to a run
#[derive(Debug, Error)]
pub enum WriteError {
    /// The modes document could not be serialized
    #[error("failed to serialize modes: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An artifact could not be written
    #[error("failed to write {path:?}: {source}")]
    Io {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, WriteError>;
