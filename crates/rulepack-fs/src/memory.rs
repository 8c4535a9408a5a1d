//! In-memory filesystem for tests and dry runs

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{DirEntry, FileSystem};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
    failing_lists: HashSet<PathBuf>,
}

/// A file tree held in memory
///
/// Directories exist when they were created explicitly or when a file lives
/// under them. Listings come back in path order.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

impl MemoryFileSystem {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a file, replacing any previous contents
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Add an empty directory
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.state().dirs.insert(path.into());
        self
    }

    /// Make every write to `path` fail with `PermissionDenied`
    pub fn fail_writes_to(self, path: impl Into<PathBuf>) -> Self {
        self.state().failing_writes.insert(path.into());
        self
    }

    /// Make listing `path` fail with `PermissionDenied`
    pub fn fail_listing(self, path: impl Into<PathBuf>) -> Self {
        self.state().failing_lists.insert(path.into());
        self
    }

    /// Add or replace a file through a shared reference
    pub fn insert_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.state().files.insert(path.into(), contents.into());
    }

    /// Current contents of a file, if it exists
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state().files.get(path.as_ref()).cloned()
    }

    fn dir_exists(state: &State, path: &Path) -> bool {
        state.dirs.iter().any(|d| d.starts_with(path))
            || state
                .files
                .keys()
                .any(|f| f.starts_with(path) && f.as_path() != path)
    }
}

fn first_component(relative: &Path) -> Option<(String, bool)> {
    let mut components = relative.components();
    match components.next() {
        Some(Component::Normal(name)) => {
            let is_leaf = components.next().is_none();
            Some((name.to_string_lossy().to_string(), is_leaf))
        }
        _ => None,
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let state = self.state();

        if state.failing_lists.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("listing {} is not permitted", path.display()),
            ));
        }

        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is not a directory", path.display()),
            ));
        }

        if !Self::dir_exists(&state, path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }

        let mut seen = BTreeSet::new();
        let mut entries = Vec::new();

        let file_children = state
            .files
            .keys()
            .filter_map(|f| f.strip_prefix(path).ok())
            .filter_map(first_component);
        let dir_children = state
            .dirs
            .iter()
            .filter_map(|d| d.strip_prefix(path).ok())
            .filter_map(first_component)
            .map(|(name, _)| (name, false));

        for (name, is_file) in file_children.chain(dir_children) {
            if seen.insert(name.clone()) {
                entries.push(DirEntry { name, is_file });
            }
        }

        Ok(entries)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.state().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = self.state();

        if state.failing_writes.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("writing {} is not permitted", path.display()),
            ));
        }

        state.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
