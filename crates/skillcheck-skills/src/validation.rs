//! Skill validation against the Agent Skills and Claude Code specifications.
//!
//! Every check runs independently and appends to the same
//! [`ValidationResult`]; nothing short-circuits. Checks run in a fixed order
//! (name, description, compatibility, directory match, allowed-tools,
//! optional directories, body size) so output is stable.

use std::fs;
use std::io;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::models::{SkillDocument, Spec, ValidationResult};
use crate::tools::{self, Convention};

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;
pub const MAX_COMPATIBILITY_LENGTH: usize = 500;

/// Recommended body budget in tokens. One token is roughly four characters.
pub const MAX_BODY_TOKENS_RECOMMENDED: usize = 5000;
pub const MAX_BODY_CHARS_RECOMMENDED: usize = MAX_BODY_TOKENS_RECOMMENDED * 4;

/// Claude Code body line limit.
pub const MAX_BODY_LINES_CLAUDE_CODE: usize = 500;

/// Subdirectories that are optional but must be non-empty directories.
pub const OPTIONAL_DIRECTORIES: [&str; 3] = ["scripts", "assets", "references"];

const RESERVED_WORDS: [&str; 2] = ["anthropic", "claude"];

/// `Read`, `Bash(git:*)`, `mcp__figma-desktop`.
static TOOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]*(\(.*\))?$").expect("tool pattern"));

static XML_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z][^>]*>").expect("xml tag pattern"));

/// Validate a skill against `spec`.
///
/// `Spec::Auto` applies only the rules shared by both specifications.
pub fn validate(skill: &SkillDocument, spec: Spec) -> ValidationResult {
    let mut result = ValidationResult::new();

    validate_name(skill, spec, &mut result);
    validate_description(skill, spec, &mut result);
    validate_compatibility(skill, &mut result);
    validate_directory_match(skill, &mut result);
    validate_allowed_tools(skill, spec, &mut result);
    validate_optional_directories(skill, &mut result);
    validate_body_size(skill, spec, &mut result);

    debug!(
        "Validated '{}' against {}: {} error(s), {} warning(s)",
        skill.name,
        spec,
        result.errors.len(),
        result.warnings.len()
    );

    result
}

/// Validate every document against the same spec.
pub fn validate_many(skills: &[SkillDocument], spec: Spec) -> Vec<ValidationResult> {
    skills.iter().map(|skill| validate(skill, spec)).collect()
}

fn validate_name(skill: &SkillDocument, spec: Spec, result: &mut ValidationResult) {
    let name = skill.name.as_str();

    if name.is_empty() {
        result.add_error("name", "is required");
        return;
    }

    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        result.add_error(
            "name",
            format!("must be 1-{} characters (got {})", MAX_NAME_LENGTH, length),
        );
    }

    if name.chars().any(char::is_uppercase) {
        result.add_error("name", "must be lowercase (uppercase characters not allowed)");
    }

    if name
        .chars()
        .any(|c| !(c.is_lowercase() || c.is_numeric() || c == '-'))
    {
        result.add_error(
            "name",
            "may only contain lowercase alphanumeric characters (a-z, 0-9) and hyphens (-)",
        );
    }

    if name.starts_with('-') {
        result.add_error("name", "must not start with a hyphen");
    }
    if name.ends_with('-') {
        result.add_error("name", "must not end with a hyphen");
    }
    if name.contains("--") {
        result.add_error("name", "must not contain consecutive hyphens (--)");
    }

    if spec == Spec::ClaudeCode {
        if contains_xml_tags(name) {
            result.add_error("name", "must not contain XML tags");
        }
        if contains_reserved_word(name) {
            result.add_error(
                "name",
                "must not contain reserved words 'anthropic' or 'claude'",
            );
        }
    }
}

fn validate_description(skill: &SkillDocument, spec: Spec, result: &mut ValidationResult) {
    let description = skill.description.as_str();

    if description.is_empty() {
        result.add_error("description", "is required");
        return;
    }

    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LENGTH {
        result.add_error(
            "description",
            format!(
                "must be 1-{} characters (got {})",
                MAX_DESCRIPTION_LENGTH, length
            ),
        );
    }

    if spec == Spec::ClaudeCode && contains_xml_tags(description) {
        result.add_error("description", "must not contain XML tags");
    }
}

fn validate_compatibility(skill: &SkillDocument, result: &mut ValidationResult) {
    let Some(compatibility) = skill.compatibility.as_deref() else {
        return;
    };

    let length = compatibility.chars().count();
    if length == 0 || length > MAX_COMPATIBILITY_LENGTH {
        result.add_error(
            "compatibility",
            format!(
                "must be 1-{} characters (got {})",
                MAX_COMPATIBILITY_LENGTH, length
            ),
        );
    }
}

fn validate_directory_match(skill: &SkillDocument, result: &mut ValidationResult) {
    if skill.name.is_empty() || skill.source_location.as_os_str().is_empty() {
        return;
    }

    let Some(dir_name) = skill.directory_name() else {
        return;
    };

    if dir_name != skill.name {
        result.add_error(
            "name",
            format!(
                "must match parent directory name (expected {:?}, got {:?})",
                dir_name, skill.name
            ),
        );
    }
}

fn validate_allowed_tools(skill: &SkillDocument, spec: Spec, result: &mut ValidationResult) {
    let Some(raw) = skill.allowed_tools.as_deref() else {
        return;
    };
    if raw.trim().is_empty() {
        return;
    }

    let convention = Convention::detect(raw);
    let tools = tools::tokenize_with(raw, convention);

    match (spec, convention) {
        (Spec::AgentSkills, Convention::Comma) => {
            result.add_error(
                "allowed-tools",
                format!(
                    "must use {} format for Agent Skills specification (e.g., 'Read Glob Grep')",
                    Convention::Space
                ),
            );
            return;
        }
        (Spec::ClaudeCode, Convention::Space) if tools.len() > 1 => {
            result.add_error(
                "allowed-tools",
                format!(
                    "must use {} format for Claude Code specification (e.g., 'Read, Grep, Glob')",
                    Convention::Comma
                ),
            );
            return;
        }
        _ => {}
    }

    for tool in tools.iter().filter(|t| !TOOL_PATTERN.is_match(t)) {
        result.add_error(
            "allowed-tools",
            format!(
                "invalid tool format: {:?} (must be alphanumeric or ToolName(args))",
                tool
            ),
        );
    }
}

fn validate_optional_directories(skill: &SkillDocument, result: &mut ValidationResult) {
    if skill.source_location.as_os_str().is_empty() {
        return;
    }

    for dir in OPTIONAL_DIRECTORIES {
        let path = skill.source_location.join(dir);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        if !metadata.is_dir() {
            result.add_error(dir, "must be a directory if present (found a file)");
            continue;
        }

        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!("Cannot list {:?}: {}", path, e);
                continue;
            }
        };

        if entries.is_empty() {
            result.add_error(dir, "must not be empty if present");
            continue;
        }

        let mut hidden: Vec<_> = entries.iter().filter(|n| n.starts_with('.')).collect();
        hidden.sort();
        for name in hidden {
            result.add_warning(
                dir,
                format!("contains hidden file or directory: {:?}", name),
            );
        }
    }
}

fn validate_body_size(skill: &SkillDocument, spec: Spec, result: &mut ValidationResult) {
    let chars = skill.body.chars().count();
    if chars > MAX_BODY_CHARS_RECOMMENDED {
        result.add_warning(
            "body",
            format!(
                "is very large (approximately {} tokens), recommendation is to keep it under {} tokens",
                chars / 4,
                MAX_BODY_TOKENS_RECOMMENDED
            ),
        );
    }

    if spec == Spec::ClaudeCode {
        let lines = skill.body.matches('\n').count() + 1;
        if lines > MAX_BODY_LINES_CLAUDE_CODE {
            result.add_warning(
                "body",
                format!(
                    "exceeds recommended {} lines (got {} lines), consider splitting into separate files",
                    MAX_BODY_LINES_CLAUDE_CODE, lines
                ),
            );
        }
    }
}

fn contains_xml_tags(s: &str) -> bool {
    XML_TAG_PATTERN.is_match(s)
}

fn contains_reserved_word(s: &str) -> bool {
    let lower = s.to_lowercase();
    RESERVED_WORDS.iter().any(|w| lower.contains(w))
}
