//! Mode loader
//!
//! Every document in the modes directory becomes one [`Mode`]. The slug comes
//! from the file name; the front matter supplies the rest of the metadata.

use futures::future::try_join_all;
use rulepack_fs::FileSystem;
use rulepack_types::Mode;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{LoadError, Result};
use crate::extension::DocumentExtension;
use crate::frontmatter::FrontMatterParser;

/// Loads mode documents from a directory
pub struct ModeLoader {
    fs: Arc<dyn FileSystem>,
    parser: FrontMatterParser,
    extension: DocumentExtension,
}

impl ModeLoader {
    /// Create a loader for `.md` documents
    pub fn new(fs: Arc<dyn FileSystem>) -> Result<Self> {
        Ok(Self {
            fs,
            parser: FrontMatterParser::new()?,
            extension: DocumentExtension::default(),
        })
    }

    /// Use a different document extension
    #[must_use]
    pub fn with_extension(mut self, extension: DocumentExtension) -> Self {
        self.extension = extension;
        self
    }

    /// Load every mode document in `dir`, in directory-listing order.
    ///
    /// A directory that is missing or cannot be listed yields no modes. A
    /// document that cannot be read or whose front matter is malformed fails
    /// the whole load.
    pub async fn load(&self, dir: &Path) -> Result<Vec<Mode>> {
        let entries = match self.fs.list_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Modes directory {:?} unavailable, continuing without modes: {}", dir, e);
                return Ok(Vec::new());
            }
        };

        let documents: Vec<_> = entries
            .iter()
            .filter(|entry| entry.is_file)
            .filter_map(|entry| {
                let slug = self.extension.strip(&entry.name)?;
                Some((slug.to_string(), dir.join(&entry.name)))
            })
            .collect();

        debug!(
            "Found {} mode documents in {:?} ({} entries listed)",
            documents.len(),
            dir,
            entries.len()
        );

        let modes = try_join_all(
            documents
                .into_iter()
                .map(|(slug, path)| async move { self.load_file(slug, &path).await }),
        )
        .await?;

        info!("Loaded {} modes from {:?}", modes.len(), dir);
        Ok(modes)
    }

    /// Read and parse a single mode document
    pub async fn load_file(&self, slug: impl Into<String>, path: &Path) -> Result<Mode> {
        let slug = slug.into();
        let text = self
            .fs
            .read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let front_matter =
            self.parser
                .parse(&text)
                .map_err(|source| LoadError::MalformedFrontMatter {
                    path: path.to_path_buf(),
                    source,
                })?;

        debug!("Parsed mode '{}' from {:?}", slug, path);
        Ok(Mode::from_metadata(
            slug,
            front_matter.metadata,
            front_matter.body,
            path,
        ))
    }
}
