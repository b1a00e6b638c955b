//! Per-directory checks and status classification.
//!
//! A directory is parsed once and then validated against each requested
//! specification. A `CLAUDE.md` in the same directory is checked alongside.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::companion;
use crate::models::{CompanionDocument, SkillDocument, Spec, ValidationResult};
use crate::parser::{self, SkillError};
use crate::validation;

// ── Status ──────────────────────────────────────────────────────────────

/// Classified outcome for one document under one specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Fail,
    /// The document could not be located or parsed.
    NotFound,
    Warn,
}

impl Status {
    /// Classify a validation outcome. `None` means parsing failed.
    pub fn classify(result: Option<&ValidationResult>) -> Self {
        match result {
            None => Status::NotFound,
            Some(r) if !r.is_valid() => Status::Fail,
            Some(r) if r.has_warnings() => Status::Warn,
            Some(_) => Status::Pass,
        }
    }

    /// Short label for terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::NotFound => "N/A",
            Status::Warn => "WARN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Reports ─────────────────────────────────────────────────────────────

/// Validation outcome under one specification.
#[derive(Debug, Clone, Serialize)]
pub struct SpecResult {
    pub spec: Spec,
    pub status: Status,
    /// `None` when the document failed to parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidationResult>,
}

impl SpecResult {
    fn evaluated(skill: &SkillDocument, spec: Spec) -> Self {
        let result = validation::validate(skill, spec);
        Self {
            spec,
            status: Status::classify(Some(&result)),
            result: Some(result),
        }
    }

    fn not_found(spec: Spec) -> Self {
        Self {
            spec,
            status: Status::NotFound,
            result: None,
        }
    }
}

/// Outcome for a `CLAUDE.md` found next to the skill.
#[derive(Debug, Clone)]
pub struct CompanionReport {
    pub path: PathBuf,
    pub document: Result<CompanionDocument, String>,
    pub status: Status,
    pub result: Option<ValidationResult>,
}

impl CompanionReport {
    fn check(path: PathBuf) -> Self {
        match companion::parse_companion(&path) {
            Ok(document) => {
                let result = companion::validate_companion(&document);
                Self {
                    path,
                    status: Status::classify(Some(&result)),
                    document: Ok(document),
                    result: Some(result),
                }
            }
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                Self {
                    path,
                    document: Err(e.to_string()),
                    status: Status::NotFound,
                    result: None,
                }
            }
        }
    }
}

/// Everything known about one checked directory.
#[derive(Debug)]
pub struct CheckReport {
    pub path: PathBuf,
    pub skill: Result<SkillDocument, SkillError>,
    /// One entry per evaluated specification, in evaluation order.
    pub results: Vec<SpecResult>,
    pub companion: Option<CompanionReport>,
}

impl CheckReport {
    pub fn parse_error(&self) -> Option<&SkillError> {
        self.skill.as_ref().err()
    }

    /// Result for a specific specification, if it was evaluated.
    pub fn result_for(&self, spec: Spec) -> Option<&SpecResult> {
        self.results.iter().find(|r| r.spec == spec)
    }

    /// True when any evaluated specification reported errors.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.status == Status::Fail)
    }

    /// True when any result (including the companion) has warnings.
    pub fn has_warnings(&self) -> bool {
        self.results.iter().any(|r| r.status == Status::Warn)
            || self
                .companion
                .as_ref()
                .is_some_and(|c| c.status == Status::Warn)
    }
}

// ── Checker ─────────────────────────────────────────────────────────────

/// Check the skill in `dir` against `spec`.
///
/// `Spec::Auto` evaluates both specifications.
pub fn check(dir: &Path, spec: Spec) -> CheckReport {
    let skill = parser::parse(dir);

    let results = match &skill {
        Ok(document) => spec
            .variants()
            .iter()
            .map(|&variant| SpecResult::evaluated(document, variant))
            .collect(),
        Err(e) => {
            debug!("Skill in {:?} not checked: {}", dir, e);
            spec.variants()
                .iter()
                .map(|&variant| SpecResult::not_found(variant))
                .collect()
        }
    };

    let companion = companion::find_companion(dir).map(CompanionReport::check);

    CheckReport {
        path: dir.to_path_buf(),
        skill,
        results,
        companion,
    }
}

/// Check every directory, in order. Failures never stop the batch.
pub fn check_all<P: AsRef<Path>>(dirs: &[P], spec: Spec) -> Vec<CheckReport> {
    dirs.iter().map(|dir| check(dir.as_ref(), spec)).collect()
}
