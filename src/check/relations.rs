//! Relations pointing at canonicals nobody declares.

use super::graph::CanonicalGraph;
use super::{CheckIssue, CheckRule};

pub fn detect_dangling_relations(graph: &CanonicalGraph) -> Vec<CheckIssue> {
    graph
        .dangling()
        .map(|edge| {
            let mut message = format!("{}:{} points at undeclared canonical", edge.kind, edge.token.trim());
            let others = graph.referrers(&edge.token).len().saturating_sub(1);
            if others > 0 {
                message.push_str(&format!(
                    " (referenced from {} other place{})",
                    others,
                    if others == 1 { "" } else { "s" }
                ));
            }
            CheckIssue::error(
                CheckRule::DanglingRelation,
                edge.source.file.clone(),
                Some(edge.source.line),
                message,
            )
            .with_suggestion(format!(
                "declare {} on the target waymark or fix the reference",
                crate::record::normalize_canonical(&edge.token)
            ))
        })
        .collect()
}
