//! Batch summary counts.
//!
//! Aggregates a set of check reports into per-status totals used by both the
//! text and JSON renderers, and by exit-code selection.

use serde::Serialize;
use skillcheck_skills::{CheckReport, Spec, Status};
use std::collections::BTreeMap;

/// Per-specification status totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub fail: usize,
    pub warn: usize,
    pub not_found: usize,
}

impl StatusCounts {
    fn record(&mut self, status: Status) {
        match status {
            Status::Pass => self.pass += 1,
            Status::Fail => self.fail += 1,
            Status::Warn => self.warn += 1,
            Status::NotFound => self.not_found += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail + self.warn + self.not_found
    }
}

/// Totals over a whole batch of checked directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of directories checked.
    pub checked: usize,
    /// Directories whose `SKILL.md` could not be read or parsed.
    pub parse_failures: usize,
    /// Directories with at least one failing specification.
    pub failed: usize,
    /// Directories with warnings but no failures.
    pub warned: usize,
    /// Counts per evaluated specification.
    pub by_spec: BTreeMap<String, StatusCounts>,
}

impl Summary {
    /// Build a summary from check reports.
    pub fn from_reports(reports: &[CheckReport]) -> Self {
        let mut summary = Self {
            checked: reports.len(),
            ..Default::default()
        };

        for report in reports {
            if report.parse_error().is_some() {
                summary.parse_failures += 1;
            } else if report.has_failures() {
                summary.failed += 1;
            } else if report.has_warnings() {
                summary.warned += 1;
            }

            for result in &report.results {
                summary
                    .by_spec
                    .entry(result.spec.to_string())
                    .or_default()
                    .record(result.status);
            }
        }

        summary
    }

    /// Directories that parsed and passed every specification.
    pub fn passed(&self) -> usize {
        self.checked - self.parse_failures - self.failed - self.warned
    }

    pub fn counts_for(&self, spec: Spec) -> Option<&StatusCounts> {
        self.by_spec.get(spec.as_str())
    }

    pub fn has_parse_failures(&self) -> bool {
        self.parse_failures > 0
    }
}
