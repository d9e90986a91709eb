//! Parsed waymark records, as supplied by the grammar collaborator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The sigil that introduces a waymark inside a comment.
pub const SIGIL: &str = ":::";

/// Marker type of the one-per-file summary waymark.
pub const SUMMARY_MARKER: &str = "tldr";

/// Boolean modifiers carried by a waymark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    /// In-progress work that must not be merged as-is.
    #[serde(default)]
    pub flagged: bool,
    /// Marked as important.
    #[serde(default)]
    pub starred: bool,
}

/// The closed vocabulary of relation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    From,
    Replaces,
    See,
    Docs,
    Needs,
    Blocks,
    Dupeof,
    Rel,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::From => "from",
            RelationKind::Replaces => "replaces",
            RelationKind::See => "see",
            RelationKind::Docs => "docs",
            RelationKind::Needs => "needs",
            RelationKind::Blocks => "blocks",
            RelationKind::Dupeof => "dupeof",
            RelationKind::Rel => "rel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "from" => Some(RelationKind::From),
            "replaces" => Some(RelationKind::Replaces),
            "see" => Some(RelationKind::See),
            "docs" => Some(RelationKind::Docs),
            "needs" => Some(RelationKind::Needs),
            "blocks" => Some(RelationKind::Blocks),
            "dupeof" => Some(RelationKind::Dupeof),
            "rel" => Some(RelationKind::Rel),
            _ => None,
        }
    }

    /// Whether a relation of this kind must point at a declared canonical.
    pub fn requires_canonical(&self) -> bool {
        matches!(
            self,
            RelationKind::From | RelationKind::Replaces | RelationKind::See | RelationKind::Docs
        )
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed reference from one waymark to a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub token: String,
}

impl Relation {
    pub fn new(kind: RelationKind, token: impl Into<String>) -> Self {
        Self {
            kind,
            token: token.into(),
        }
    }

    /// Direct-by-ID addressing, written `[[id]]`. Exempt from canonical checks.
    pub fn is_identifier_reference(&self) -> bool {
        let t = self.token.trim();
        t.len() > 4 && t.starts_with("[[") && t.ends_with("]]")
    }

    /// Absolute URL (`scheme://...`). Exempt from canonical checks.
    pub fn is_url(&self) -> bool {
        let t = self.token.trim();
        match t.find("://") {
            Some(idx) if idx > 0 => {
                let scheme = &t[..idx];
                scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                    && t.len() > idx + 3
            }
            _ => false,
        }
    }
}

/// One parsed waymark. Lines are 1-indexed and inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaymarkRecord {
    #[serde(default)]
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(rename = "type")]
    pub marker: String,
    #[serde(default)]
    pub signals: Signals,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub canonicals: Vec<String>,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WaymarkRecord {
    /// A bare record of the given marker spanning a single line.
    pub fn new(file: impl Into<String>, line: usize, marker: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            start_line: line,
            end_line: line,
            marker: marker.into(),
            signals: Signals::default(),
            contents: String::new(),
            properties: BTreeMap::new(),
            relations: Vec::new(),
            canonicals: Vec::new(),
            mentions: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = contents.into();
        self
    }

    pub fn with_canonical(mut self, token: impl Into<String>) -> Self {
        self.canonicals.push(token.into());
        self
    }

    pub fn with_relation(mut self, kind: RelationKind, token: impl Into<String>) -> Self {
        self.relations.push(Relation::new(kind, token));
        self
    }

    pub fn flagged(mut self) -> Self {
        self.signals.flagged = true;
        self
    }

    /// Whether this is a summary (`tldr`) waymark.
    pub fn is_summary(&self) -> bool {
        self.marker.eq_ignore_ascii_case(SUMMARY_MARKER)
    }

    /// Whether the line span satisfies `1 <= start_line <= end_line`.
    pub fn has_valid_span(&self) -> bool {
        self.start_line >= 1 && self.start_line <= self.end_line
    }
}

/// Normalize a canonical token for indexing and lookup: trimmed,
/// `#`-prefixed, lower-cased.
pub fn normalize_canonical(token: &str) -> String {
    let trimmed = token.trim();
    let bare = trimmed.trim_start_matches('#');
    format!("#{}", bare.to_lowercase())
}
