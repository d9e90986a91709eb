//! Check runner: read and parse files in parallel, then validate.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::{validate, CheckError, CheckIssue, CheckOptions, CheckReport, CheckRule};
use crate::grammar::Grammar;
use crate::record::WaymarkRecord;

/// What reading and parsing one file produced.
enum FileOutcome {
    Parsed(Vec<WaymarkRecord>),
    Failed(CheckIssue),
}

/// Runs the grammar over a set of files and validates the result.
pub struct Checker<'g> {
    base_dir: PathBuf,
    grammar: &'g dyn Grammar,
    options: CheckOptions,
}

impl<'g> Checker<'g> {
    /// Create a checker. File names in issues are reported relative to `base_dir`.
    pub fn new<P: AsRef<Path>>(base_dir: P, grammar: &'g dyn Grammar) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            grammar,
            options: CheckOptions::default(),
        }
    }

    pub fn options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    /// How a path appears in issues and records.
    pub fn label(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        if relative.as_os_str().is_empty() {
            return path.to_string_lossy().replace('\\', "/");
        }
        relative.to_string_lossy().replace('\\', "/")
    }

    fn load(&self, path: &Path) -> FileOutcome {
        let label = self.label(path);

        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(file = %label, error = %e, "could not read file");
                return FileOutcome::Failed(CheckIssue::error(
                    CheckRule::FileReadError,
                    label,
                    None,
                    format!("could not read file: {}", e),
                ));
            }
        };

        match self.grammar.parse(&source, &label) {
            Ok(mut records) => {
                for record in &mut records {
                    record.file = label.clone();
                }
                tracing::debug!(file = %label, records = records.len(), "parsed");
                FileOutcome::Parsed(records)
            }
            Err(e) => {
                tracing::warn!(file = %label, error = %e, "could not parse waymarks");
                FileOutcome::Failed(CheckIssue::error(
                    CheckRule::ParseError,
                    label,
                    None,
                    format!("could not parse waymarks: {}", e),
                ))
            }
        }
    }

    /// Check `files`. Issues from unreadable or unparsable files come first,
    /// in input order; those files contribute no records.
    pub fn run(&self, files: &[PathBuf]) -> Result<CheckReport, CheckError> {
        // Indexed parallel collect keeps input order.
        let outcomes: Vec<FileOutcome> = files.par_iter().map(|p| self.load(p)).collect();

        let mut issues = Vec::new();
        let mut records = Vec::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Parsed(parsed) => records.extend(parsed),
                FileOutcome::Failed(issue) => issues.push(issue),
            }
        }

        issues.extend(validate(&records, &self.options)?);
        tracing::debug!(files = files.len(), records = records.len(), issues = issues.len(), "check complete");

        Ok(CheckReport {
            issues,
            files_scanned: files.len(),
            records: records.len(),
        })
    }
}
