//! RulePack Types - Core types for the rulepack aggregator
//!
//! This module defines the records that flow from the loaders to the writer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Metadata keys that are always set from the file itself, never from front matter
pub const RESERVED_KEYS: [&str; 3] = ["slug", "roleDefinition", "sourcePath"];

/// A reusable behavior profile loaded from one mode document
///
/// Serializes as `{slug, name, roleDefinition, ...metadata, sourcePath}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role_definition: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
    pub source_path: PathBuf,
}

impl Mode {
    /// Build a mode from parsed front matter, then apply the file-derived fields.
    ///
    /// Front matter never overrides `slug`, `roleDefinition` or `sourcePath`.
    /// A string `name` is lifted into [`Mode::name`]; any other `name` value is
    /// passed through with the rest of the metadata.
    pub fn from_metadata(
        slug: impl Into<String>,
        mut metadata: Map<String, Value>,
        role_definition: impl Into<String>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        for key in RESERVED_KEYS {
            metadata.remove(key);
        }

        let name = match metadata.remove("name") {
            Some(Value::String(name)) => Some(name),
            Some(Value::Null) | None => None,
            Some(other) => {
                metadata.insert("name".to_string(), other);
                None
            }
        };

        Self {
            slug: slug.into(),
            name,
            role_definition: role_definition.into(),
            metadata,
            source_path: source_path.into(),
        }
    }
}

/// A rule document: opaque text ordered by its file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDocument {
    pub file_name: String,
    pub content: String,
}

impl RuleDocument {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// The structured modes artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModesDocument {
    pub custom_modes: Vec<Mode>,
}

/// Both artifacts of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutput {
    pub modes: ModesDocument,
    pub rules_text: String,
}
