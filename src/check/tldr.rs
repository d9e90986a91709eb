//! Summary waymark cardinality and placement.

use indexmap::IndexMap;

use super::{CheckIssue, CheckOptions, CheckRule};
use crate::language::Language;
use crate::record::WaymarkRecord;

/// Per file: one error at the second summary when there are several, and a
/// warning for every summary sitting below the line threshold.
pub fn detect_tldr_issues(records: &[WaymarkRecord], options: &CheckOptions) -> Vec<CheckIssue> {
    let mut by_file: IndexMap<&str, Vec<&WaymarkRecord>> = IndexMap::new();
    for record in records.iter().filter(|r| r.is_summary()) {
        by_file.entry(record.file.as_str()).or_default().push(record);
    }

    let mut issues = Vec::new();
    for (file, summaries) in by_file {
        if let Some(second) = summaries.get(1) {
            let lines: Vec<String> = summaries.iter().map(|r| r.start_line.to_string()).collect();
            issues.push(
                CheckIssue::error(
                    CheckRule::MultipleTldr,
                    file,
                    Some(second.start_line),
                    format!(
                        "{} tldr waymarks in one file (lines {})",
                        summaries.len(),
                        lines.join(", ")
                    ),
                )
                .with_suggestion("keep a single tldr per file"),
            );
        }

        let max_line = max_line_for(file, options);
        for summary in summaries.iter().filter(|r| r.start_line > max_line) {
            issues.push(
                CheckIssue::warning(
                    CheckRule::TldrPosition,
                    file,
                    Some(summary.start_line),
                    format!(
                        "tldr on line {} is past line {}",
                        summary.start_line, max_line
                    ),
                )
                .with_suggestion("move the tldr to the top of the file"),
            );
        }
    }
    issues
}

fn max_line_for(file: &str, options: &CheckOptions) -> usize {
    match Language::from_path(file) {
        Some(Language::Markdown) => options.tldr_max_line_markdown,
        _ => options.tldr_max_line,
    }
}
