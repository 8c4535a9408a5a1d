//! Error types for loading mode and rule documents

use std::path::PathBuf;
use thiserror::Error;

/// Front-matter parsing errors
#[derive(Debug, Error)]
pub enum FrontMatterError {
    /// The block between the markers is not valid YAML
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The block parsed, but to something other than a key/value mapping
    #[error("expected a mapping, found {found}")]
    NotMapping {
        /// Kind of YAML value that was found
        found: &'static str,
    },

    /// The mapping cannot be represented as JSON (e.g. non-string keys)
    #[error("metadata is not representable as JSON: {0}")]
    Conversion(#[from] serde_json::Error),
}

/// Loader errors
///
/// Missing input directories are not errors; loaders report them as empty
/// results. Everything here aborts the run.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A document could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A mode document has a front-matter block that does not parse
    #[error("malformed front matter in {path:?}: {source}")]
    MalformedFrontMatter {
        /// Document path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: FrontMatterError,
    },

    /// The front-matter pattern failed to compile
    #[error("front matter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, LoadError>;
