//! Building the artifact contents
//!
//! Pure functions; nothing here touches the filesystem.

use rulepack_types::{AggregateOutput, Mode, ModesDocument, RuleDocument};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Separator placed between rule documents and before the modes summary
pub const SECTION_SEPARATOR: &str = "\n\n";

/// First line of the modes summary
pub const SUMMARY_HEADER: &str = "## Available Modes";

const UNNAMED: &str = "(unnamed)";

/// Join rule documents with a blank line, in the order given
pub fn merge_rules(rules: &[RuleDocument]) -> String {
    rules
        .iter()
        .map(|rule| rule.content.as_str())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// `path` relative to `root`, or `path` itself when it lies elsewhere
pub fn relative_source_path(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

/// One line per mode: `- <slug> <name> at <relative source path>`
///
/// Returns `None` when there are no modes.
pub fn render_summary(modes: &[Mode], root: &Path) -> Option<String> {
    if modes.is_empty() {
        return None;
    }

    let mut summary = String::from(SUMMARY_HEADER);
    for mode in modes {
        summary.push('\n');
        summary.push_str(&format!(
            "- {} {} at {}",
            mode.slug,
            mode.name.as_deref().unwrap_or(UNNAMED),
            relative_source_path(&mode.source_path, root).display()
        ));
    }

    Some(summary)
}

/// Log every slug that more than one document claims. All of them are kept.
pub fn warn_duplicate_slugs(modes: &[Mode]) -> usize {
    let mut first_seen: HashMap<&str, &Path> = HashMap::new();
    let mut duplicates = 0;

    for mode in modes {
        if let Some(previous) = first_seen.get(mode.slug.as_str()) {
            warn!(
                "Duplicate mode slug '{}': {:?} and {:?} are both written",
                mode.slug, previous, mode.source_path
            );
            duplicates += 1;
        } else {
            first_seen.insert(&mode.slug, &mode.source_path);
        }
    }

    duplicates
}

/// Assemble both artifacts.
///
/// Modes keep the order they arrive in unless `sort_modes` is set, in which
/// case they are ordered by slug (stable for equal slugs).
pub fn compose(
    mut modes: Vec<Mode>,
    rules: &[RuleDocument],
    root: &Path,
    sort_modes: bool,
) -> AggregateOutput {
    if sort_modes {
        modes.sort_by(|a, b| a.slug.cmp(&b.slug));
    }

    let mut rules_text = merge_rules(rules);
    if let Some(summary) = render_summary(&modes, root) {
        if !rules_text.is_empty() {
            rules_text.push_str(SECTION_SEPARATOR);
        }
        rules_text.push_str(&summary);
    }

    AggregateOutput {
        modes: ModesDocument {
            custom_modes: modes,
        },
        rules_text,
    }
}
