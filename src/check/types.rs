//! Core types for check results.

use serde::{Deserialize, Serialize};

/// Severity levels for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Rule names for the different issue types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckRule {
    FileReadError,
    ParseError,
    DuplicateCanonical,
    DanglingRelation,
    MultipleTldr,
    TldrPosition,
    FlaggedSignal,
}

impl CheckRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckRule::FileReadError => "file-read-error",
            CheckRule::ParseError => "parse-error",
            CheckRule::DuplicateCanonical => "duplicate-canonical",
            CheckRule::DanglingRelation => "dangling-relation",
            CheckRule::MultipleTldr => "multiple-tldr",
            CheckRule::TldrPosition => "tldr-position",
            CheckRule::FlaggedSignal => "flagged-signal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "file-read-error" => Some(CheckRule::FileReadError),
            "parse-error" => Some(CheckRule::ParseError),
            "duplicate-canonical" => Some(CheckRule::DuplicateCanonical),
            "dangling-relation" => Some(CheckRule::DanglingRelation),
            "multiple-tldr" => Some(CheckRule::MultipleTldr),
            "tldr-position" => Some(CheckRule::TldrPosition),
            "flagged-signal" => Some(CheckRule::FlaggedSignal),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single integrity issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIssue {
    pub file: String,
    /// Absent for whole-file issues (read and parse failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub rule: CheckRule,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl CheckIssue {
    pub fn error(rule: CheckRule, file: impl Into<String>, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            rule,
            severity: Severity::Error,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn warning(rule: CheckRule, file: impl Into<String>, line: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(rule, file, line, message)
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// `file:line`, or just `file` when there is no line.
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.file, line),
            None => self.file.clone(),
        }
    }
}

/// Thresholds used by the rule passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub tldr_max_line: usize,
    pub tldr_max_line_markdown: usize,
    pub preview_length: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            tldr_max_line: crate::config::DEFAULT_TLDR_MAX_LINE,
            tldr_max_line_markdown: crate::config::DEFAULT_TLDR_MAX_LINE_MARKDOWN,
            preview_length: crate::config::DEFAULT_PREVIEW_LENGTH,
        }
    }
}

/// Results of a check run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckReport {
    pub issues: Vec<CheckIssue>,
    /// Number of files scanned
    pub files_scanned: usize,
    /// Number of waymark records validated
    pub records: usize,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Failures that abort a check run rather than becoming issues.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("malformed record in {file}: start line {start_line}, end line {end_line}")]
    MalformedRecord {
        file: String,
        start_line: usize,
        end_line: usize,
    },
}
