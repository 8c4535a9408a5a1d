//! Recognized document extension

/// The file extension that marks a document, stored with its leading dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExtension(String);

impl DocumentExtension {
    /// Accepts `md` or `.md`
    pub fn new(extension: &str) -> Self {
        let trimmed = extension.trim().trim_start_matches('.');
        Self(format!(".{trimmed}"))
    }

    /// The extension including its leading dot
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without the extension, or `None` when the name does not
    /// carry it or nothing would remain.
    pub fn strip<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.0.as_str())
            .filter(|stem| !stem.is_empty())
    }
}

impl Default for DocumentExtension {
    fn default() -> Self {
        Self::new("md")
    }
}
