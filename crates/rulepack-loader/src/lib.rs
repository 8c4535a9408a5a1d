//! `RulePack` Loaders
//!
//! Reads the two input directories of a project:
//!
//! - **Modes**: one document per mode, optionally opening with YAML front
//!   matter. The slug is the file name without its extension.
//! - **Rules**: plain documents concatenated in file-name order.
//!
//! Missing directories degrade to empty results. Unreadable documents and
//! malformed front matter are errors.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod error;
pub mod extension;
pub mod frontmatter;
pub mod modes;
pub mod rules;

pub use error::{FrontMatterError, LoadError};
pub use extension::DocumentExtension;
pub use frontmatter::{FrontMatter, FrontMatterParser};
pub use modes::ModeLoader;
pub use rules::RuleLoader;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DocumentExtension, LoadError, ModeLoader, RuleLoader};
}
