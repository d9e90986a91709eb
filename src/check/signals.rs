//! Flagged (in-progress) waymarks.

use super::{CheckIssue, CheckOptions, CheckRule};
use crate::record::WaymarkRecord;

pub fn detect_flagged_signals(records: &[WaymarkRecord], options: &CheckOptions) -> Vec<CheckIssue> {
    records
        .iter()
        .filter(|r| r.signals.flagged)
        .map(|r| {
            CheckIssue::warning(
                CheckRule::FlaggedSignal,
                r.file.clone(),
                Some(r.start_line),
                format!("flagged {} waymark must be resolved before merge", r.marker),
            )
            .with_suggestion(preview(&r.contents, options.preview_length))
        })
        .collect()
}

/// The first `max` characters of `text`, with `...` when cut.
pub fn preview(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}
