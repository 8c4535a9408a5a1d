//! Filesystem access for rulepack
//!
//! The loaders and the writer never touch `std::fs` directly. They go through
//! [`FileSystem`], so a run can be pointed at the real disk
//! ([`LocalFileSystem`]) or at an in-memory tree ([`MemoryFileSystem`]).

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod local;
pub mod memory;

use async_trait::async_trait;
use std::io;
use std::path::Path;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name without its parent directory
    pub name: String,
    /// True for regular files, false for directories and everything else
    pub is_file: bool,
}

impl DirEntry {
    /// A regular file entry
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
        }
    }

    /// A directory entry
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
        }
    }
}

/// Read/write access to a file tree
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List the direct children of `path`, in the order the backend yields them
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read a whole file as UTF-8 text
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the contents of `path`, creating missing parent directories
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DirEntry, FileSystem, LocalFileSystem, MemoryFileSystem};
}
