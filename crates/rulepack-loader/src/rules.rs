//! Rule loader
//!
//! Rule documents are plain text. They are returned sorted by file name so
//! the merged output is identical for identical inputs.

use futures::future::try_join_all;
use rulepack_fs::FileSystem;
use rulepack_types::RuleDocument;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{LoadError, Result};
use crate::extension::DocumentExtension;

/// Loads rule documents from a directory
pub struct RuleLoader {
    fs: Arc<dyn FileSystem>,
    extension: DocumentExtension,
}

impl RuleLoader {
    /// Create a loader for `.md` documents
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            extension: DocumentExtension::default(),
        }
    }

    /// Use a different document extension
    #[must_use]
    pub fn with_extension(mut self, extension: DocumentExtension) -> Self {
        self.extension = extension;
        self
    }

    /// Load the rule documents of `dir`, sorted by file name (byte order).
    ///
    /// A directory that cannot be listed yields no documents; a document that
    /// cannot be read fails the load.
    pub async fn load(&self, dir: &Path) -> Result<Vec<RuleDocument>> {
        let entries = match self.fs.list_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to list rules directory {:?}, rules output will be empty: {}", dir, e);
                return Ok(Vec::new());
            }
        };

        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.is_file && self.extension.strip(&entry.name).is_some())
            .map(|entry| entry.name)
            .collect();
        names.sort();

        let documents = try_join_all(names.into_iter().map(|name| async move {
            let path = dir.join(&name);
            let content = self
                .fs
                .read_to_string(&path)
                .await
                .map_err(|source| LoadError::Io { path, source })?;
            Ok::<_, LoadError>(RuleDocument::new(name, content))
        }))
        .await?;

        info!("Loaded {} rule documents from {:?}", documents.len(), dir);
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulepack_fs::{LocalFileSystem, MemoryFileSystem};
    use tempfile::TempDir;

    fn contents(documents: &[RuleDocument]) -> Vec<&str> {
        documents.iter().map(|d| d.content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_sorted_by_file_name() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.md"), "Rule B").unwrap();
        std::fs::write(dir.path().join("a.md"), "Rule A").unwrap();
        std::fs::write(dir.path().join("10-late.md"), "Rule 10").unwrap();
        std::fs::write(dir.path().join("02-early.md"), "Rule 02").unwrap();

        let loader = RuleLoader::new(Arc::new(LocalFileSystem::new()));
        let documents = loader.load(dir.path()).await.unwrap();

        assert_eq!(
            contents(&documents),
            vec!["Rule 02", "Rule 10", "Rule A", "Rule B"]
        );
        assert_eq!(documents[0].file_name, "02-early.md");
    }

    #[tokio::test]
    async fn test_byte_order_puts_uppercase_first() {
        let loader = RuleLoader::new(Arc::new(
            MemoryFileSystem::new()
                .with_file("/p/rules/b.md", "lower b")
                .with_file("/p/rules/A.md", "upper A")
                .with_file("/p/rules/B.md", "upper B"),
        ));

        let documents = loader.load(Path::new("/p/rules")).await.unwrap();
        assert_eq!(contents(&documents), vec!["upper A", "upper B", "lower b"]);
    }

    #[tokio::test]
    async fn test_repeat_loads_are_identical() {
        let dir = TempDir::new().unwrap();
        for (name, body) in [("c.md", "C"), ("a.md", "A"), ("b.md", "B")] {
            std::fs::write(dir.path().join(name), body).unwrap();
        }

        let loader = RuleLoader::new(Arc::new(LocalFileSystem::new()));
        let first = loader.load(dir.path()).await.unwrap();
        let second = loader.load(dir.path()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_skips_subdirectories_and_other_extensions() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.md"), "A").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();
        std::fs::write(dir.path().join("nested.md").join("inner.md"), "ignored").unwrap();

        let loader = RuleLoader::new(Arc::new(LocalFileSystem::new()));
        let documents = loader.load(dir.path()).await.unwrap();
        assert_eq!(contents(&documents), vec!["A"]);
    }

    #[tokio::test]
    async fn test_content_is_kept_verbatim() {
        let loader = RuleLoader::new(Arc::new(
            MemoryFileSystem::new().with_file("/p/rules/a.md", "---\nnot: metadata\n---\n  body\n\n"),
        ));

        let documents = loader.load(Path::new("/p/rules")).await.unwrap();
        assert_eq!(contents(&documents), vec!["---\nnot: metadata\n---\n  body\n\n"]);
    }

    #[tokio::test]
    async fn test_missing_directory_yields_nothing() {
        let loader = RuleLoader::new(Arc::new(MemoryFileSystem::new()));
        let documents = loader.load(Path::new("/p/rules")).await.unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_custom_extension() {
        let loader = RuleLoader::new(Arc::new(
            MemoryFileSystem::new()
                .with_file("/p/rules/a.md", "markdown")
                .with_file("/p/rules/b.txt", "text"),
        ))
        .with_extension(DocumentExtension::new(".txt"));

        let documents = loader.load(Path::new("/p/rules")).await.unwrap();
        assert_eq!(contents(&documents), vec!["text"]);
    }
}
