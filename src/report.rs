//! Output formatting for check results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::check::{CheckIssue, CheckReport, Severity};
use crate::summary::{CheckMode, Summary};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub mode: CheckMode,
    pub passed: bool,
    pub files_scanned: usize,
    pub records: usize,
    pub summary: Summary,
    pub issues: Vec<CheckIssue>,
}

impl JsonReport {
    pub fn new(path: &str, report: &CheckReport, mode: CheckMode) -> Self {
        let summary = Summary::from_issues(&report.issues);
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            mode,
            passed: summary.passed(mode),
            files_scanned: report.files_scanned,
            records: report.records,
            summary,
            issues: report.issues.clone(),
        }
    }
}

/// Render results as pretty-printed JSON.
pub fn render_json(path: &str, report: &CheckReport, mode: CheckMode) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(path, report, mode))?)
}

/// Write results in JSON format to stdout.
pub fn write_json(path: &str, report: &CheckReport, mode: CheckMode) -> anyhow::Result<()> {
    println!("{}", render_json(path, report, mode)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Applies a style only when color output is on.
#[derive(Debug, Clone, Copy)]
struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Render results in pretty (human-readable) format.
pub fn render_pretty(path: &str, config_path: Option<&str>, report: &CheckReport, mode: CheckMode, color: bool) -> String {
    let p = Painter { color };
    let summary = Summary::from_issues(&report.issues);
    let mut out = String::new();

    // Header
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} v{}",
        p.paint("waymark", |s| s.cyan().bold()),
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "  {}{}", p.paint("Scanning: ", |s| s.dimmed()), path);
    let _ = writeln!(
        out,
        "  {}{}",
        p.paint("Config:   ", |s| s.dimmed()),
        config_path.unwrap_or("(defaults)")
    );
    let _ = writeln!(out, "  {}{}", p.paint("Mode:     ", |s| s.dimmed()), mode);
    let _ = writeln!(out);

    if !report.issues.is_empty() {
        write_issues(&mut out, &report.issues, p);
    }

    write_final_status(&mut out, report, &summary, mode, p);
    let _ = writeln!(out);
    out
}

/// Write results in pretty format to stdout.
pub fn write_pretty(path: &str, config_path: Option<&str>, report: &CheckReport, mode: CheckMode, color: bool) {
    print!("{}", render_pretty(path, config_path, report, mode, color));
}

fn write_issues(out: &mut String, issues: &[CheckIssue], p: Painter) {
    let _ = writeln!(out, "  {} ({}):", p.paint("Issues", |s| s.bold()), issues.len());
    let _ = writeln!(out);

    for issue in issues {
        let _ = write!(out, "{}", severity_tag(&issue.severity, p));
        let _ = write!(out, "   {}", p.paint(&format!("{:<20}", issue.rule.as_str()), |s| s.dimmed()));
        let _ = write!(out, "{}", p.paint(&issue.file, |s| s.blue()));
        if let Some(line) = issue.line {
            let _ = write!(out, "{}", p.paint(&format!(":{}", line), |s| s.dimmed()));
        }
        let _ = writeln!(out);

        // Message on next line, indented
        let _ = writeln!(out, "            {}", issue.message);
        if let Some(suggestion) = &issue.suggestion {
            let _ = writeln!(out, "            {}", p.paint(&format!("hint: {}", suggestion), |s| s.dimmed()));
        }
        let _ = writeln!(out);
    }
}

fn severity_tag(severity: &Severity, p: Painter) -> String {
    match severity {
        Severity::Error => format!("    {} ", p.paint("ERROR", |s| s.red())),
        Severity::Warning => format!("    {} ", p.paint("WARN ", |s| s.yellow())),
    }
}

fn write_final_status(out: &mut String, report: &CheckReport, summary: &Summary, mode: CheckMode, p: Painter) {
    let status = if summary.passed(mode) {
        p.paint("✓ PASS", |s| s.green())
    } else {
        p.paint("✗ FAIL", |s| s.red())
    };
    let plural = |n: usize| if n != 1 { "s" } else { "" };
    let _ = writeln!(
        out,
        "  {}  {} file{} scanned, {} waymark{}, {} error{}, {} warning{}",
        status,
        report.files_scanned,
        plural(report.files_scanned),
        report.records,
        plural(report.records),
        summary.errors,
        plural(summary.errors),
        summary.warnings,
        plural(summary.warnings),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckRule;

    fn report() -> CheckReport {
        CheckReport {
            issues: vec![
                CheckIssue::error(CheckRule::DanglingRelation, "src/a.ts", Some(4), "from:#gone points at undeclared canonical"),
                CheckIssue::warning(CheckRule::FlaggedSignal, "src/b.ts", Some(9), "flagged todo waymark")
                    .with_suggestion("wire retries"),
                CheckIssue::error(CheckRule::ParseError, "src/c.ts", None, "could not parse"),
            ],
            files_scanned: 3,
            records: 5,
        }
    }

    #[test]
    fn test_pretty_without_color() {
        let out = render_pretty(".", None, &report(), CheckMode::Default, false);
        assert!(out.contains("Issues (3):"));
        assert!(out.contains("src/a.ts:4"));
        assert!(out.contains("hint: wire retries"));
        assert!(out.contains("✗ FAIL"));
        assert!(out.contains("3 files scanned, 5 waymarks, 2 errors, 1 warning"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_pretty_clean_run() {
        let clean = CheckReport {
            files_scanned: 1,
            ..Default::default()
        };
        let out = render_pretty(".", Some("waymark.yaml"), &clean, CheckMode::Strict, false);
        assert!(out.contains("✓ PASS"));
        assert!(out.contains("Config:   waymark.yaml"));
        assert!(!out.contains("Issues"));
    }

    #[test]
    fn test_json_report() {
        let json = render_json("src", &report(), CheckMode::Strict).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "strict");
        assert_eq!(value["passed"], false);
        assert_eq!(value["summary"]["errors"], 2);
        assert_eq!(value["summary"]["warnings"], 1);
        assert_eq!(value["issues"][0]["rule"], "dangling-relation");
        assert_eq!(value["issues"][1]["suggestion"], "wire retries");
        assert!(value["issues"][2].get("line").is_none());
    }
}
