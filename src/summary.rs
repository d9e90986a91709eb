//! Issue totals and the pass/fail decision.

use serde::{Deserialize, Serialize};

use crate::check::{CheckIssue, Severity};

/// How strictly a run is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Errors fail the run.
    #[default]
    Default,
    /// Errors and warnings fail the run.
    Strict,
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckMode::Default => write!(f, "default"),
            CheckMode::Strict => write!(f, "strict"),
        }
    }
}

/// Counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn from_issues(issues: &[CheckIssue]) -> Self {
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();
        Self {
            total: issues.len(),
            errors,
            warnings,
        }
    }

    pub fn passed(&self, mode: CheckMode) -> bool {
        match mode {
            CheckMode::Default => self.errors == 0,
            CheckMode::Strict => self.errors == 0 && self.warnings == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckRule;

    #[test]
    fn test_warnings_only() {
        let issues = vec![
            CheckIssue::warning(CheckRule::FlaggedSignal, "a.ts", Some(1), "flagged"),
            CheckIssue::warning(CheckRule::TldrPosition, "a.ts", Some(40), "late"),
        ];
        let summary = Summary::from_issues(&issues);
        assert_eq!(summary, Summary { total: 2, errors: 0, warnings: 2 });
        assert!(summary.passed(CheckMode::Default));
        assert!(!summary.passed(CheckMode::Strict));
    }

    #[test]
    fn test_errors_fail_both_modes() {
        let issues = vec![CheckIssue::error(CheckRule::DanglingRelation, "a.ts", Some(3), "dangling")];
        let summary = Summary::from_issues(&issues);
        assert!(!summary.passed(CheckMode::Default));
        assert!(!summary.passed(CheckMode::Strict));
    }

    #[test]
    fn test_empty_passes() {
        assert!(Summary::default().passed(CheckMode::Strict));
    }
}
