//! Disk-backed filesystem on top of `tokio::fs`

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::{DirEntry, FileSystem};

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new handle to the local disk
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut reader = fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping non UTF-8 file name {:?} in {:?}", raw, path);
                    continue;
                }
            };
            // Follows symlinks, so a link to a document counts as a file
            let is_file = fs::metadata(entry.path())
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            entries.push(DirEntry { name, is_file });
        }

        Ok(entries)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !fs::try_exists(parent).await? {
                debug!("Creating output directory {:?}", parent);
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(path, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_dir_marks_files_and_dirs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.md"), "A").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let mut entries = LocalFileSystem.list_dir(dir.path()).await.unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries, vec![DirEntry::file("a.md"), DirEntry::dir("nested")]);
    }

    // Linux filesystems accept arbitrary bytes in names; others may refuse to create one
    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_list_dir_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("good.md"), "A").unwrap();
        std::fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.md")), "B").unwrap();

        let entries = LocalFileSystem.list_dir(dir.path()).await.unwrap();
        assert_eq!(entries, vec![DirEntry::file("good.md")]);
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = LocalFileSystem
            .list_dir(&dir.path().join("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_write_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out").join("deep").join("file.txt");

        LocalFileSystem.write(&target, "first").await.unwrap();
        LocalFileSystem.write(&target, "second").await.unwrap();

        let text = LocalFileSystem.read_to_string(&target).await.unwrap();
        assert_eq!(text, "second");
    }

    #[tokio::test]
    async fn test_write_to_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert!(LocalFileSystem.write(dir.path(), "x").await.is_err());
    }
}
