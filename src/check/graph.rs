//! Canonical declarations and the relations that point at them.

use indexmap::IndexMap;
use serde::Serialize;

use crate::record::{normalize_canonical, RelationKind, WaymarkRecord};

/// Where a record sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Normalized canonical token to every declaration of it, in record order.
#[derive(Debug, Clone, Default)]
pub struct CanonicalIndex {
    entries: IndexMap<String, Vec<Location>>,
}

impl CanonicalIndex {
    pub fn build(records: &[WaymarkRecord]) -> Self {
        let mut entries: IndexMap<String, Vec<Location>> = IndexMap::new();
        for record in records {
            for token in &record.canonicals {
                entries
                    .entry(normalize_canonical(token))
                    .or_default()
                    .push(Location {
                        file: record.file.clone(),
                        line: record.start_line,
                    });
            }
        }
        Self { entries }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(&normalize_canonical(token))
    }

    pub fn occurrences(&self, token: &str) -> &[Location] {
        self.entries
            .get(&normalize_canonical(token))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tokens declared more than once, in first-declaration order.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[Location])> {
        self.entries
            .iter()
            .filter(|(_, locs)| locs.len() > 1)
            .map(|(token, locs)| (token.as_str(), locs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One relation as it appears on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationEdge {
    pub source: Location,
    pub kind: RelationKind,
    pub token: String,
    /// Canonical-requiring and not an identifier reference or URL.
    pub checked: bool,
}

/// The index plus every relation edge.
#[derive(Debug, Clone, Default)]
pub struct CanonicalGraph {
    pub index: CanonicalIndex,
    pub edges: Vec<RelationEdge>,
}

impl CanonicalGraph {
    pub fn build(records: &[WaymarkRecord]) -> Self {
        let index = CanonicalIndex::build(records);
        let edges = records
            .iter()
            .flat_map(|record| {
                record.relations.iter().map(move |rel| RelationEdge {
                    source: Location {
                        file: record.file.clone(),
                        line: record.start_line,
                    },
                    kind: rel.kind,
                    token: rel.token.clone(),
                    checked: rel.kind.requires_canonical()
                        && !rel.is_identifier_reference()
                        && !rel.is_url(),
                })
            })
            .collect();
        Self { index, edges }
    }

    /// Every edge pointing at `token`, whatever its kind.
    pub fn referrers(&self, token: &str) -> Vec<&RelationEdge> {
        let wanted = normalize_canonical(token);
        self.edges
            .iter()
            .filter(|e| normalize_canonical(&e.token) == wanted)
            .collect()
    }

    /// Checked edges whose target is never declared.
    pub fn dangling(&self) -> impl Iterator<Item = &RelationEdge> {
        self.edges
            .iter()
            .filter(|e| e.checked && !self.index.contains(&e.token))
    }
}
