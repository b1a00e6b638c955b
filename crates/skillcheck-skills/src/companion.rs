//! `CLAUDE.md` companion documents.
//!
//! Unlike `SKILL.md`, frontmatter here is optional and a broken block is not
//! an error: the whole file is treated as body instead. Validation only
//! produces warnings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::frontmatter;
use crate::models::{CompanionDocument, ValidationResult};
use crate::parser::{self, Result};

pub const COMPANION_FILE_NAME: &str = "CLAUDE.md";

/// Project-local configuration directory searched before the root.
pub const COMPANION_DIR: &str = ".claude";

/// Body size above which a companion is flagged as very large (~12500 tokens).
pub const MAX_COMPANION_BYTES: usize = 50_000;

/// Body size above which a companion is flagged as moderately large.
pub const WARN_COMPANION_BYTES: usize = 20_000;

/// Locate `CLAUDE.md` in `dir`, preferring `.claude/CLAUDE.md`.
pub fn find_companion(dir: &Path) -> Option<PathBuf> {
    [
        dir.join(COMPANION_DIR).join(COMPANION_FILE_NAME),
        dir.join(COMPANION_FILE_NAME),
    ]
    .into_iter()
    .find(|path| path.is_file())
}

/// Parse a companion document from `path`.
///
/// Only a missing or unreadable file is an error.
pub fn parse_companion(path: &Path) -> Result<CompanionDocument> {
    let content = parser::read_file(path, COMPANION_FILE_NAME)?;
    Ok(parse_companion_str(&content, path))
}

/// Parse companion content that was already read.
pub fn parse_companion_str(content: &str, location: &Path) -> CompanionDocument {
    let Some(fm) = frontmatter::extract_lenient(content) else {
        return CompanionDocument::plain(content, location);
    };

    let metadata = match parser::parse_mapping(&fm.block) {
        Ok(mapping) => mapping
            .into_iter()
            .filter_map(|(key, value)| match key {
                Value::String(key) => Some((key, value)),
                _ => None,
            })
            .collect(),
        Err(e) => {
            debug!("Ignoring unparsable frontmatter in {:?}: {}", location, e);
            BTreeMap::new()
        }
    };

    CompanionDocument {
        has_metadata_block: true,
        metadata,
        body_byte_size: fm.body.len(),
        body: fm.body,
        source_location: location.to_path_buf(),
    }
}

/// Check a companion document. The result never contains errors.
pub fn validate_companion(document: &CompanionDocument) -> ValidationResult {
    let mut result = ValidationResult::new();
    let size = document.body_byte_size;

    if size > MAX_COMPANION_BYTES {
        result.add_warning(
            "body",
            "file is very large (>50KB), may impact context window usage",
        );
    } else if size > WARN_COMPANION_BYTES {
        result.add_warning("body", "file is moderately large (>20KB), consider splitting");
    }

    if size == 0 {
        result.add_warning("body", "file is empty");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_companion_priority() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_companion(temp_dir.path()).is_none());

        let root = temp_dir.path().join(COMPANION_FILE_NAME);
        fs::write(&root, "root").unwrap();
        assert_eq!(find_companion(temp_dir.path()), Some(root));

        let nested_dir = temp_dir.path().join(COMPANION_DIR);
        fs::create_dir_all(&nested_dir).unwrap();
        let nested = nested_dir.join(COMPANION_FILE_NAME);
        fs::write(&nested, "nested").unwrap();
        assert_eq!(find_companion(temp_dir.path()), Some(nested));
    }

    #[test]
    fn test_plain_markdown() {
        let doc = parse_companion_str("# Hello\nWorld", Path::new("CLAUDE.md"));
        assert!(!doc.has_metadata_block);
        assert_eq!(doc.body, "# Hello\nWorld");
        assert_eq!(doc.body_byte_size, 13);
    }

    #[test]
    fn test_with_frontmatter() {
        let doc = parse_companion_str("---\nname: test\n---\n# Body", Path::new("CLAUDE.md"));
        assert!(doc.has_metadata_block);
        assert_eq!(doc.metadata["name"], Value::String("test".into()));
        assert_eq!(doc.body, "# Body");
    }

    #[test]
    fn test_unclosed_frontmatter_becomes_body() {
        let content = "---\nname: test\nNo closing";
        let doc = parse_companion_str(content, Path::new("CLAUDE.md"));
        assert!(!doc.has_metadata_block);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_unparsable_yaml_keeps_block_flag() {
        let doc = parse_companion_str("---\nkey: [oops\n---\ntext", Path::new("CLAUDE.md"));
        assert!(doc.has_metadata_block);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "text");
    }

    #[test]
    fn test_parse_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(COMPANION_FILE_NAME);
        fs::write(&path, "").unwrap();

        let doc = parse_companion(&path).unwrap();
        assert_eq!(doc.body, "");
        assert_eq!(doc.body_byte_size, 0);
    }

    #[test]
    fn test_parse_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = parse_companion(&temp_dir.path().join(COMPANION_FILE_NAME)).unwrap_err();
        assert!(err.is_not_found());
    }

    fn sized(size: usize) -> CompanionDocument {
        CompanionDocument::plain("x".repeat(size), Path::new("CLAUDE.md"))
    }

    #[test]
    fn test_validate_sizes() {
        let result = validate_companion(&sized(100));
        assert!(!result.has_warnings());

        let result = validate_companion(&sized(30_000));
        assert!(result.is_valid());
        assert!(result.warnings[0].message.contains("moderately large"));

        let result = validate_companion(&sized(60_000));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("very large"));

        let result = validate_companion(&sized(0));
        assert!(result.warnings[0].message.contains("file is empty"));
    }
}
