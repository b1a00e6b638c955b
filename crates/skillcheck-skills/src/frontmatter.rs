//! Frontmatter extraction.
//!
//! Splits a document into the YAML block between two `---` lines and the
//! Markdown body that follows. Two entry points exist with different failure
//! policies: [`extract`] is strict and used for `SKILL.md`, while
//! [`extract_lenient`] never fails and is used for companion documents.

/// Delimiter line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// Why a document has no usable metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrontmatterError {
    /// The document contains no non-empty line.
    #[error("empty file")]
    EmptyDocument,

    /// The first non-empty line is not `---`.
    #[error("missing opening frontmatter delimiter (---)")]
    MissingOpeningDelimiter,

    /// No `---` line follows the opening delimiter.
    #[error("missing closing frontmatter delimiter (---)")]
    MissingClosingDelimiter,
}

/// A document split into its metadata block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    /// Raw YAML lines between the delimiters, verbatim.
    pub block: String,

    /// Everything after the closing delimiter, leading newlines removed.
    pub body: String,
}

/// Split `text` into metadata block and body.
pub fn extract(text: &str) -> Result<Frontmatter, FrontmatterError> {
    let mut lines = text.lines().skip_while(|line| line.trim().is_empty());

    let first = lines.next().ok_or(FrontmatterError::EmptyDocument)?;
    if first.trim() != DELIMITER {
        return Err(FrontmatterError::MissingOpeningDelimiter);
    }

    let mut block_lines = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim() == DELIMITER {
            closed = true;
            break;
        }
        block_lines.push(line);
    }

    if !closed {
        return Err(FrontmatterError::MissingClosingDelimiter);
    }

    let body = lines.collect::<Vec<_>>().join("\n");

    Ok(Frontmatter {
        block: block_lines.join("\n"),
        body: body.trim_start_matches('\n').to_string(),
    })
}

/// Split `text` like [`extract`], but never fail.
///
/// Returns `None` when there is no complete metadata block; the caller then
/// treats the whole input as body.
pub fn extract_lenient(text: &str) -> Option<Frontmatter> {
    extract(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let fm = extract("---\nname: x\n---\nBODY").unwrap();
        assert_eq!(fm.block, "name: x");
        assert_eq!(fm.body, "BODY");
    }

    #[test]
    fn test_extract_strips_leading_blank_lines() {
        let fm = extract("---\nname: x\n---\n\n\n# Title\n\ntext\n").unwrap();
        assert_eq!(fm.body, "# Title\n\ntext");
    }

    #[test]
    fn test_extract_keeps_block_lines_verbatim() {
        let fm = extract("---\nmetadata:\n  author: me\n---\n").unwrap();
        assert_eq!(fm.block, "metadata:\n  author: me");
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_extract_trims_delimiters() {
        let fm = extract("\n  ---  \nname: x\n--- \r\nbody").unwrap();
        assert_eq!(fm.block, "name: x");
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_extract_errors() {
        assert_eq!(extract(""), Err(FrontmatterError::EmptyDocument));
        assert_eq!(extract("\n  \n"), Err(FrontmatterError::EmptyDocument));
        assert_eq!(
            extract("# No frontmatter"),
            Err(FrontmatterError::MissingOpeningDelimiter)
        );
        assert_eq!(
            extract("---\nname: test\ndescription: test\n"),
            Err(FrontmatterError::MissingClosingDelimiter)
        );
    }

    #[test]
    fn test_extract_lenient() {
        assert!(extract_lenient("---\nname: test\nNo closing").is_none());
        assert!(extract_lenient("# Plain").is_none());
        assert_eq!(extract_lenient("---\n---\nok").unwrap().body, "ok");
    }
}
