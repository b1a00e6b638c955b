//! Human and machine readable check reports.

use chrono::Utc;
use serde_json::{json, Value};
use skillcheck_skills::{CheckReport, CompanionReport, Status, ValidationResult};

use crate::summary::Summary;

/// Report generator for check results.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Render reports as indented plain text with a closing summary line.
    pub fn text_report(reports: &[CheckReport]) -> String {
        let mut report = String::new();

        for check in reports {
            report.push_str(&format!("{}\n", check.path.display()));

            if let Some(err) = check.parse_error() {
                report.push_str(&format!("  [{}] {}\n", Status::NotFound, err));
            } else {
                for spec_result in &check.results {
                    report.push_str(&format!(
                        "  [{}] {}\n",
                        spec_result.status, spec_result.spec
                    ));
                    if let Some(result) = &spec_result.result {
                        push_issues(&mut report, result);
                    }
                }
            }

            if let Some(companion) = &check.companion {
                push_companion(&mut report, companion);
            }

            report.push('\n');
        }

        let summary = Summary::from_reports(reports);
        report.push_str(&format!(
            "Summary: {} checked, {} passed, {} failed, {} with warnings, {} unreadable\n",
            summary.checked,
            summary.passed(),
            summary.failed,
            summary.warned,
            summary.parse_failures,
        ));

        report
    }

    /// Render reports as a JSON document.
    pub fn json_report(reports: &[CheckReport]) -> Value {
        let entries: Vec<Value> = reports.iter().map(Self::json_entry).collect();
        tracing::debug!("Rendering JSON report for {} directories", entries.len());

        json!({
            "generated_at": Utc::now().to_rfc3339(),
            "reports": entries,
            "summary": Summary::from_reports(reports),
        })
    }

    fn json_entry(check: &CheckReport) -> Value {
        let mut entry = json!({
            "path": check.path.display().to_string(),
            "results": check.results,
        });

        match &check.skill {
            Ok(skill) => entry["skill"] = json!(skill),
            Err(err) => entry["parse_error"] = json!(err.to_string()),
        }

        if let Some(companion) = &check.companion {
            let mut value = json!({
                "path": companion.path.display().to_string(),
                "status": companion.status,
            });
            if let Some(result) = &companion.result {
                value["warnings"] = json!(result.warnings);
            }
            if let Err(err) = &companion.document {
                value["error"] = json!(err);
            }
            entry["companion"] = value;
        }

        entry
    }
}

fn push_issues(report: &mut String, result: &ValidationResult) {
    for error in &result.errors {
        report.push_str(&format!("    error: {}\n", error));
    }
    for warning in &result.warnings {
        report.push_str(&format!("    warning: {}\n", warning));
    }
}

fn push_companion(report: &mut String, companion: &CompanionReport) {
    report.push_str(&format!(
        "  [{}] {}\n",
        companion.status,
        companion.path.display()
    ));
    match (&companion.document, &companion.result) {
        (Err(err), _) => report.push_str(&format!("    error: {}\n", err)),
        (Ok(_), Some(result)) => push_issues(report, result),
        (Ok(_), None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillcheck_skills::{check, check_all, Spec};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_skill(root: &Path, dir: &str, content: &str) -> PathBuf {
        let skill_dir = root.join(dir);
        fs::create_dir_all(&skill_dir).unwrap();
        fs::write(skill_dir.join("SKILL.md"), content).unwrap();
        skill_dir
    }

    #[test]
    fn test_text_report_structure() {
        let temp_dir = TempDir::new().unwrap();
        let dir = write_skill(
            temp_dir.path(),
            "claude-tools",
            "---\nname: claude-tools\ndescription: Tooling\n---\nbody",
        );

        let report = ReportGenerator::text_report(&[check(&dir, Spec::Auto)]);
        assert!(report.contains("[PASS] agent-skills"));
        assert!(report.contains("[FAIL] claude-code"));
        assert!(report.contains("error: name: must not contain reserved words"));
        assert!(report.contains("Summary: 1 checked, 0 passed, 1 failed"));
    }

    #[test]
    fn test_text_report_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let report = ReportGenerator::text_report(&[check(temp_dir.path(), Spec::Auto)]);
        assert!(report.contains("[N/A] SKILL.md not found"));
        assert!(report.contains("1 unreadable"));
    }

    #[test]
    fn test_text_report_companion() {
        let temp_dir = TempDir::new().unwrap();
        let dir = write_skill(
            temp_dir.path(),
            "docs",
            "---\nname: docs\ndescription: Docs\n---\nbody",
        );
        fs::write(dir.join("CLAUDE.md"), "").unwrap();

        let report = ReportGenerator::text_report(&[check(&dir, Spec::AgentSkills)]);
        assert!(report.contains("[WARN]"));
        assert!(report.contains("CLAUDE.md"));
        assert!(report.contains("warning: body: file is empty"));
    }

    #[test]
    fn test_json_report() {
        let temp_dir = TempDir::new().unwrap();
        let good = write_skill(
            temp_dir.path(),
            "good",
            "---\nname: good\ndescription: ok\nlicense: MIT\n---",
        );
        let missing = temp_dir.path().join("missing");

        let value = ReportGenerator::json_report(&check_all(&[good, missing], Spec::ClaudeCode));

        assert!(value["generated_at"].is_string());
        let reports = value["reports"].as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["skill"]["name"], "good");
        assert_eq!(reports[0]["skill"]["license"], "MIT");
        assert_eq!(reports[0]["results"][0]["spec"], "claude-code");
        assert_eq!(reports[0]["results"][0]["status"], "pass");
        assert!(reports[1]["parse_error"].as_str().unwrap().contains("not found"));
        assert_eq!(reports[1]["results"][0]["status"], "not_found");
        assert_eq!(value["summary"]["parse_failures"], 1);
    }
}
