//! Duplicate canonical declarations.

use super::graph::CanonicalIndex;
use super::{CheckIssue, CheckRule};

/// One error per token declared more than once, anchored at its first
/// declaration and listing every location.
pub fn detect_duplicate_canonicals(index: &CanonicalIndex) -> Vec<CheckIssue> {
    index
        .duplicates()
        .map(|(token, locations)| {
            let listed: Vec<String> = locations.iter().map(|l| l.to_string()).collect();
            CheckIssue::error(
                CheckRule::DuplicateCanonical,
                locations[0].file.clone(),
                Some(locations[0].line),
                format!(
                    "canonical {} is declared {} times: {}",
                    token,
                    locations.len(),
                    listed.join(", ")
                ),
            )
            .with_suggestion("keep one declaration and point the others at it with a relation")
        })
        .collect()
}
