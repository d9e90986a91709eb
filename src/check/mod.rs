//! Cross-file integrity checks over parsed waymarks.

mod canonicals;
mod files;
mod graph;
mod relations;
mod runner;
mod signals;
mod tldr;
mod types;

pub use canonicals::detect_duplicate_canonicals;
pub use files::{collect_files, SKIPPED_DIRS};
pub use graph::{CanonicalGraph, CanonicalIndex, Location, RelationEdge};
pub use relations::detect_dangling_relations;
pub use runner::Checker;
pub use signals::{detect_flagged_signals, preview};
pub use tldr::detect_tldr_issues;
pub use types::{CheckError, CheckIssue, CheckOptions, CheckReport, CheckRule, Severity};

use crate::record::WaymarkRecord;

/// Run every record-level rule pass, in order: duplicate canonicals,
/// dangling relations, summary placement, flagged signals.
///
/// A record with an impossible line span aborts the run.
pub fn validate(records: &[WaymarkRecord], options: &CheckOptions) -> Result<Vec<CheckIssue>, CheckError> {
    if let Some(bad) = records.iter().find(|r| !r.has_valid_span()) {
        return Err(CheckError::MalformedRecord {
            file: bad.file.clone(),
            start_line: bad.start_line,
            end_line: bad.end_line,
        });
    }

    let graph = CanonicalGraph::build(records);

    let mut issues = detect_duplicate_canonicals(&graph.index);
    issues.extend(detect_dangling_relations(&graph));
    issues.extend(detect_tldr_issues(records, options));
    issues.extend(detect_flagged_signals(records, options));
    Ok(issues)
}
