//! YAML front matter
//!
//! A document may open with a block like:
//!
//! ```text
//! ---
//! name: Reviewer
//! groups: [read]
//! ---
//! Body text...
//! ```
//!
//! The block must start on the first byte of the file. Anything else is body.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::FrontMatterError;

// `??` prefers an empty block, so `---\n---\n` never swallows a later `---` line
const FRONT_MATTER_PATTERN: &str = r"\A---[ \t]*\r?\n(?:([\s\S]*?)\r?\n)??---[ \t]*(?:\r?\n|\z)";

/// A document split into its metadata and body
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    /// Parsed metadata; empty when the document has no block
    pub metadata: Map<String, Value>,
    /// Document text with the block removed
    pub body: String,
}

/// Splits documents into front matter and body
#[derive(Debug, Clone)]
pub struct FrontMatterParser {
    pattern: Regex,
}

impl FrontMatterParser {
    /// Compile the delimiter pattern
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(FRONT_MATTER_PATTERN)?,
        })
    }

    /// Split `text` into metadata and body.
    ///
    /// Without a leading block the metadata is empty and the body is `text`
    /// unchanged. With one, the block (both markers included) is removed once
    /// and its payload parsed as YAML. A payload that does not parse, or that
    /// is not a mapping, is an error.
    pub fn parse(&self, text: &str) -> Result<FrontMatter, FrontMatterError> {
        let Some(captures) = self.pattern.captures(text) else {
            return Ok(FrontMatter {
                metadata: Map::new(),
                body: text.to_string(),
            });
        };

        let block_end = captures.get(0).map_or(0, |m| m.end());
        let payload = captures.get(1).map_or("", |m| m.as_str());

        Ok(FrontMatter {
            metadata: parse_metadata(payload)?,
            body: text[block_end..].to_string(),
        })
    }
}

fn parse_metadata(payload: &str) -> Result<Map<String, Value>, FrontMatterError> {
    if payload.trim().is_empty() {
        return Ok(Map::new());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(payload)?;
    match yaml {
        serde_yaml::Value::Null => Ok(Map::new()),
        serde_yaml::Value::Mapping(_) => match serde_json::to_value(&yaml)? {
            Value::Object(map) => Ok(map),
            _ => Err(FrontMatterError::NotMapping { found: "mapping" }),
        },
        other => Err(FrontMatterError::NotMapping {
            found: yaml_kind(&other),
        }),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parser() -> FrontMatterParser {
        FrontMatterParser::new().unwrap()
    }

    #[test]
    fn test_parse_front_matter_and_body() {
        let content = r#"---
name: Code Reviewer
groups:
  - read
  - edit
---
You review code for best practices and security.
"#;

        let parsed = parser().parse(content).unwrap();
        assert_eq!(parsed.metadata["name"], json!("Code Reviewer"));
        assert_eq!(parsed.metadata["groups"], json!(["read", "edit"]));
        assert_eq!(
            parsed.body,
            "You review code for best practices and security.\n"
        );
    }

    #[test]
    fn test_no_front_matter_keeps_text() {
        let content = "# Title\n\n---\nname: not metadata\n---\n";
        let parsed = parser().parse(content).unwrap();
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_block_must_start_the_file() {
        let content = "\n---\nname: x\n---\nbody";
        let parsed = parser().parse(content).unwrap();
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let content = "---\nname: x\nbody without closing marker";
        let parsed = parser().parse(content).unwrap();
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_empty_block() {
        let parsed = parser().parse("---\n---\nbody\n---\nmore").unwrap();
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, "body\n---\nmore");
    }

    #[test]
    fn test_block_at_end_of_file() {
        let parsed = parser().parse("---\nname: Solo\n---").unwrap();
        assert_eq!(parsed.metadata["name"], json!("Solo"));
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_only_first_block_is_removed() {
        let content = "---\na: 1\n---\nbody\n---\nb: 2\n---\n";
        let parsed = parser().parse(content).unwrap();
        assert_eq!(parsed.metadata.len(), 1);
        assert_eq!(parsed.metadata["a"], json!(1));
        assert_eq!(parsed.body, "body\n---\nb: 2\n---\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parser().parse("---\r\nname: Win\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(parsed.metadata["name"], json!("Win"));
        assert_eq!(parsed.body, "body\r\n");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let err = parser()
            .parse("---\nname: [unclosed\n---\nbody")
            .unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_sequence_payload_is_error() {
        let err = parser().parse("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(
            err,
            FrontMatterError::NotMapping { found: "a sequence" }
        ));
    }

    #[test]
    fn test_comment_only_payload_is_empty() {
        let parsed = parser().parse("---\n# nothing here\n---\nbody").unwrap();
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, "body");
    }
}
