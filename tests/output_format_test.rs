//! Tests for the JSON and pretty output formats.

mod common;

use common::{testdata_path, FixtureGrammar};
use waymark_lint::check::{collect_files, Checker};
use waymark_lint::config::Config;
use waymark_lint::report::{render_json, render_pretty, JsonReport};
use waymark_lint::summary::CheckMode;

fn run(mode: CheckMode) -> JsonReport {
    let root = testdata_path().join("repo");
    let files = collect_files(&root, &Config::default()).unwrap();
    let grammar = FixtureGrammar;
    let report = Checker::new(&root, &grammar).run(&files).unwrap();
    let json = render_json("testdata/repo", &report, mode).unwrap();
    serde_json::from_str(&json).expect("should be valid JSON")
}

#[test]
fn test_json_report_fields() {
    let report = run(CheckMode::Default);
    assert_eq!(report.path, "testdata/repo");
    assert_eq!(report.mode, CheckMode::Default);
    assert!(!report.passed);
    assert_eq!(report.files_scanned, 6);
    assert_eq!(report.summary.total, report.issues.len());
    assert_eq!(report.summary.errors + report.summary.warnings, report.summary.total);
}

#[test]
fn test_json_issue_shape() {
    let root = testdata_path().join("repo");
    let files = collect_files(&root, &Config::default()).unwrap();
    let grammar = FixtureGrammar;
    let report = Checker::new(&root, &grammar).run(&files).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&render_json("repo", &report, CheckMode::Strict).unwrap()).unwrap();

    let issues = value["issues"].as_array().unwrap();
    assert_eq!(issues[0]["rule"], "parse-error");
    assert!(issues[0].get("line").is_none());
    assert_eq!(issues[1]["rule"], "duplicate-canonical");
    assert_eq!(issues[1]["severity"], "error");
    assert_eq!(issues[1]["line"], 1);
    assert_eq!(value["mode"], "strict");
}

#[test]
fn test_pretty_report_lists_every_issue() {
    let root = testdata_path().join("repo");
    let files = collect_files(&root, &Config::default()).unwrap();
    let grammar = FixtureGrammar;
    let report = Checker::new(&root, &grammar).run(&files).unwrap();
    let out = render_pretty("testdata/repo", None, &report, CheckMode::Default, false);

    for rule in [
        "parse-error",
        "duplicate-canonical",
        "dangling-relation",
        "multiple-tldr",
        "tldr-position",
        "flagged-signal",
    ] {
        assert!(out.contains(rule), "missing {}", rule);
    }
    assert!(out.contains("src/worker.rs:25"));
    assert!(out.contains("✗ FAIL"));
}
