//! Integration tests for the full check pipeline.
//!
//! These tests run file collection, parsing and every rule pass against the
//! fixture repository in testdata/repo.

mod common;

use std::path::PathBuf;

use common::{testdata_path, FixtureGrammar};
use waymark_lint::check::{collect_files, CheckReport, CheckRule, Checker, Severity};
use waymark_lint::config::Config;
use waymark_lint::summary::{CheckMode, Summary};

fn repo_path() -> PathBuf {
    testdata_path().join("repo")
}

fn run_check() -> CheckReport {
    let root = repo_path();
    let files = collect_files(&root, &Config::default()).expect("should collect files");
    let grammar = FixtureGrammar;
    Checker::new(&root, &grammar).run(&files).expect("check should run")
}

fn issues_for(report: &CheckReport, rule: CheckRule) -> Vec<&waymark_lint::CheckIssue> {
    report.issues.iter().filter(|i| i.rule == rule).collect()
}

#[test]
fn test_collects_fixture_files() {
    let report = run_check();
    // docs/guide.md, src/{auth.ts, broken.ts, legacy.rb, session.py, worker.rs}
    assert_eq!(report.files_scanned, 6);
}

#[test]
fn test_issue_order_follows_rule_order() {
    let report = run_check();
    let rules: Vec<CheckRule> = report.issues.iter().map(|i| i.rule).collect();
    assert_eq!(
        rules,
        vec![
            CheckRule::ParseError,
            CheckRule::DuplicateCanonical,
            CheckRule::DanglingRelation,
            CheckRule::MultipleTldr,
            CheckRule::TldrPosition,
            CheckRule::FlaggedSignal,
        ]
    );
}

#[test]
fn test_parse_error_is_whole_file() {
    let report = run_check();
    let issues = issues_for(&report, CheckRule::ParseError);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].file, "src/broken.ts");
    assert_eq!(issues[0].line, None);
    assert_eq!(issues[0].severity, Severity::Error);
}

#[test]
fn test_duplicate_canonical_lists_both_locations() {
    let report = run_check();
    let issues = issues_for(&report, CheckRule::DuplicateCanonical);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].file, "src/auth.ts");
    assert_eq!(issues[0].line, Some(1));
    assert!(issues[0].message.contains("src/auth.ts:1"));
    assert!(issues[0].message.contains("src/legacy.rb:2"));
}

#[test]
fn test_only_the_missing_canonical_dangles() {
    let report = run_check();
    let issues = issues_for(&report, CheckRule::DanglingRelation);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].file, "src/session.py");
    assert_eq!(issues[0].line, Some(5));
    assert!(issues[0].message.contains("#auth/missing"));
}

#[test]
fn test_second_tldr_reported_once_with_position_warning() {
    let report = run_check();

    let multiple = issues_for(&report, CheckRule::MultipleTldr);
    assert_eq!(multiple.len(), 1);
    assert_eq!(multiple[0].file, "src/worker.rs");
    assert_eq!(multiple[0].line, Some(25));

    let position = issues_for(&report, CheckRule::TldrPosition);
    assert_eq!(position.len(), 1);
    assert_eq!(position[0].line, Some(25));
    assert_eq!(position[0].severity, Severity::Warning);
}

#[test]
fn test_flagged_signal_preview() {
    let report = run_check();
    let issues = issues_for(&report, CheckRule::FlaggedSignal);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].line, Some(5));
    assert_eq!(
        issues[0].suggestion.as_deref(),
        Some("drain the queue before shutdown so that in-flight...")
    );
}

#[test]
fn test_errors_fail_in_both_modes() {
    let summary = Summary::from_issues(&run_check().issues);
    assert_eq!(summary.errors, 4);
    assert_eq!(summary.warnings, 2);
    assert!(!summary.passed(CheckMode::Default));
    assert!(!summary.passed(CheckMode::Strict));
}

#[test]
fn test_warnings_only_pass_default_mode() {
    let root = repo_path();
    let grammar = FixtureGrammar;
    let temp = tempfile::TempDir::new().unwrap();

    // worker.rs without its second tldr: only the flagged todo remains.
    let source = std::fs::read_to_string(root.join("src/worker.rs")).unwrap();
    let trimmed: Vec<&str> = source.lines().take(24).collect();
    let worker = temp.path().join("worker.rs");
    std::fs::write(&worker, trimmed.join("\n")).unwrap();

    // guide.md relates to #auth/core, declared in auth.ts.
    let guide = temp.path().join("guide.md");
    std::fs::copy(root.join("docs/guide.md"), &guide).unwrap();
    let auth = temp.path().join("auth.ts");
    std::fs::copy(root.join("src/auth.ts"), &auth).unwrap();

    let report = Checker::new(temp.path(), &grammar)
        .run(&[auth, guide, worker])
        .unwrap();

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].rule, CheckRule::FlaggedSignal);
    assert_eq!(report.issues[0].file, "worker.rs");

    let summary = Summary::from_issues(&report.issues);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.warnings, 1);
    assert!(summary.passed(CheckMode::Default));
    assert!(!summary.passed(CheckMode::Strict));
}

#[test]
fn test_hidden_directories_can_be_included() {
    let config = Config {
        include_hidden: true,
        ..Default::default()
    };
    let files = collect_files(&repo_path(), &config).unwrap();
    assert!(files.iter().any(|p| p.ends_with(".scratch/ignored.ts")));

    let grammar = FixtureGrammar;
    let report = Checker::new(repo_path(), &grammar).run(&files).unwrap();
    let dup = issues_for(&report, CheckRule::DuplicateCanonical);
    assert!(dup[0].message.contains("3 times"));
}
