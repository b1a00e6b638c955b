//! Core data models for skill validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::tools;

// ── Specification ───────────────────────────────────────────────────────

/// Which skill specification a document is checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spec {
    /// No variant-specific rules.
    #[default]
    Auto,
    /// agentskills.io: space-separated tools.
    AgentSkills,
    /// Claude Code: comma-separated tools, reserved words, body line limit.
    ClaudeCode,
}

impl Spec {
    /// Stable identifier used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Spec::Auto => "auto",
            Spec::AgentSkills => "agent-skills",
            Spec::ClaudeCode => "claude-code",
        }
    }

    /// Concrete variants evaluated when this spec is requested.
    ///
    /// `Auto` expands to both specifications.
    pub fn variants(&self) -> &'static [Spec] {
        match self {
            Spec::Auto => &[Spec::AgentSkills, Spec::ClaudeCode],
            Spec::AgentSkills => &[Spec::AgentSkills],
            Spec::ClaudeCode => &[Spec::ClaudeCode],
        }
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Spec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Spec::Auto),
            "agent-skills" => Ok(Spec::AgentSkills),
            "claude-code" => Ok(Spec::ClaudeCode),
            other => Err(format!(
                "unknown spec '{}' (expected auto, agent-skills, or claude-code)",
                other
            )),
        }
    }
}

// ── Skill Document ──────────────────────────────────────────────────────

/// A parsed `SKILL.md`.
///
/// Known frontmatter keys are pulled into dedicated fields. Entries of the
/// nested `metadata` mapping and any unknown top-level keys end up in
/// [`SkillDocument::metadata`], so nothing in the frontmatter is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillDocument {
    /// Skill identifier. Must match the parent directory name.
    pub name: String,

    /// What the skill does and when to use it.
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Environment requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<String>,

    /// Raw `allowed-tools` value, see [`SkillDocument::parsed_allowed_tools`].
    #[serde(rename = "allowed-tools", skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<String>,

    /// Free-form string properties.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    /// Markdown after the frontmatter.
    #[serde(skip)]
    pub body: String,

    /// Directory the document was read from.
    #[serde(skip)]
    pub source_location: PathBuf,
}

impl SkillDocument {
    /// Create a document with only the required fields set.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Set the source directory.
    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.source_location = location.into();
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the raw allowed-tools string.
    pub fn with_allowed_tools(mut self, tools: impl Into<String>) -> Self {
        self.allowed_tools = Some(tools.into());
        self
    }

    /// Allowed tools split into identifiers. Empty when the field is absent.
    pub fn parsed_allowed_tools(&self) -> Vec<String> {
        self.allowed_tools
            .as_deref()
            .map(tools::tokenize)
            .unwrap_or_default()
    }

    /// Path of the `SKILL.md` this document came from.
    pub fn skill_file(&self) -> PathBuf {
        self.source_location.join(crate::parser::SKILL_FILE_NAME)
    }

    /// Final component of the source directory, if any.
    ///
    /// Paths such as `.` or `skills/x/..` have no literal final component and
    /// are resolved first. `source_location` itself is left untouched.
    pub fn directory_name(&self) -> Option<String> {
        if let Some(name) = self.source_location.file_name() {
            return Some(name.to_string_lossy().into_owned());
        }

        let resolved = fs::canonicalize(&self.source_location)
            .or_else(|_| std::path::absolute(&self.source_location))
            .ok()?;
        resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

// ── Companion Document ──────────────────────────────────────────────────

/// A parsed `CLAUDE.md`. Frontmatter is optional and loosely typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanionDocument {
    /// Whether a complete `---` block was found.
    pub has_metadata_block: bool,

    /// Parsed block. Empty when absent or unparsable.
    pub metadata: BTreeMap<String, serde_yaml::Value>,

    pub body: String,

    /// Size of `body` in bytes.
    pub body_byte_size: usize,

    /// Path of the file that was read.
    pub source_location: PathBuf,
}

impl CompanionDocument {
    /// Document made entirely of body text.
    pub fn plain(body: impl Into<String>, location: &Path) -> Self {
        let body = body.into();
        Self {
            has_metadata_block: false,
            metadata: BTreeMap::new(),
            body_byte_size: body.len(),
            body,
            source_location: location.to_path_buf(),
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────────

/// A single finding attached to a frontmatter field (or `body`, or an
/// optional directory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub field: String,
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating one document against one specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Problems that make the document invalid.
    pub errors: Vec<Issue>,

    /// Non-critical findings.
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    /// Create an empty (passing) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Issue::new(field, message));
    }

    /// Add a warning.
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Issue::new(field, message));
    }

    /// True when there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// True when there is anything worth surfacing.
    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_parse_and_display() {
        for spec in [Spec::Auto, Spec::AgentSkills, Spec::ClaudeCode] {
            assert_eq!(spec.as_str().parse::<Spec>().unwrap(), spec);
        }
        assert!("claude".parse::<Spec>().is_err());
        assert_eq!(Spec::default(), Spec::Auto);
    }

    #[test]
    fn test_spec_variants() {
        assert_eq!(Spec::Auto.variants().len(), 2);
        assert_eq!(Spec::ClaudeCode.variants(), &[Spec::ClaudeCode]);
    }

    #[test]
    fn test_spec_serde() {
        let json = serde_json::to_string(&Spec::AgentSkills).unwrap();
        assert_eq!(json, "\"agent-skills\"");
    }

    #[test]
    fn test_document_builder() {
        let doc = SkillDocument::new("forms", "Form handling")
            .with_location("/skills/forms")
            .with_allowed_tools("Read Grep")
            .with_body("# Forms");
        assert_eq!(doc.directory_name().as_deref(), Some("forms"));
        assert_eq!(doc.parsed_allowed_tools(), vec!["Read", "Grep"]);
        assert_eq!(doc.skill_file(), PathBuf::from("/skills/forms/SKILL.md"));
    }

    #[test]
    fn test_no_allowed_tools() {
        let doc = SkillDocument::new("forms", "Form handling");
        assert!(doc.parsed_allowed_tools().is_empty());
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(!result.has_issues());

        result.add_warning("body", "is very large");
        assert!(result.is_valid());
        assert!(result.has_issues());

        result.add_error("name", "is required");
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].to_string(), "name: is required");
    }
}
