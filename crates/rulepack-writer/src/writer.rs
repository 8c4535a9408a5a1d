//! Output writer
//!
//! Persists the modes document and the merged rules text. The two files are
//! written one after the other and each is replaced in full.

use rulepack_fs::FileSystem;
use rulepack_types::{Mode, RuleDocument};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::compose::{compose, warn_duplicate_slugs};
use crate::error::{Result, WriteError};

/// Where the two artifacts go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Structured modes document (JSON)
    pub modes: PathBuf,
    /// Merged rules text
    pub rules: PathBuf,
}

/// What a write pass produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Number of modes written
    pub modes: usize,
    /// Number of rule documents merged
    pub rules: usize,
    /// Duplicate slugs seen among the modes
    pub duplicate_slugs: usize,
}

/// Writes the aggregated artifacts
pub struct OutputWriter {
    fs: Arc<dyn FileSystem>,
    paths: OutputPaths,
    root: PathBuf,
    sort_modes: bool,
}

impl OutputWriter {
    /// Create a writer; summary paths are shown relative to `root`
    pub fn new(fs: Arc<dyn FileSystem>, paths: OutputPaths, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            paths,
            root: root.into(),
            sort_modes: false,
        }
    }

    /// Order modes by slug instead of keeping the order they were loaded in
    #[must_use]
    pub fn with_sorted_modes(mut self, sort_modes: bool) -> Self {
        self.sort_modes = sort_modes;
        self
    }

    /// Output locations
    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Merge and persist both artifacts
    pub async fn write(&self, modes: Vec<Mode>, rules: &[RuleDocument]) -> Result<WriteReport> {
        let duplicate_slugs = warn_duplicate_slugs(&modes);
        let output = compose(modes, rules, &self.root, self.sort_modes);

        let modes_json = serde_json::to_string_pretty(&output.modes)?;
        self.persist(&self.paths.modes, &modes_json).await?;
        info!(
            "Wrote {} modes to {:?}",
            output.modes.custom_modes.len(),
            self.paths.modes
        );

        self.persist(&self.paths.rules, &output.rules_text).await?;
        info!(
            "Wrote {} rule documents to {:?}",
            rules.len(),
            self.paths.rules
        );

        Ok(WriteReport {
            modes: output.modes.custom_modes.len(),
            rules: rules.len(),
            duplicate_slugs,
        })
    }

    async fn persist(&self, path: &Path, contents: &str) -> Result<()> {
        self.fs
            .write(path, contents)
            .await
            .map_err(|source| WriteError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}
