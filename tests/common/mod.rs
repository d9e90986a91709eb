//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use waymark_lint::grammar::{Grammar, GrammarError};
use waymark_lint::record::{Relation, RelationKind, WaymarkRecord, SIGIL};

pub fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// A small line-based waymark reader for fixtures.
///
/// `<leader> [*]marker ::: words ref:#canonical kind:token`. A leading `*`
/// on the marker flags the waymark; `ref:` declares a canonical; any known
/// relation kind before a colon becomes a relation. A sigil without a marker
/// is a syntax error.
pub struct FixtureGrammar;

impl Grammar for FixtureGrammar {
    fn parse(&self, source: &str, file: &str) -> Result<Vec<WaymarkRecord>, GrammarError> {
        let mut records = Vec::new();

        for (i, line) in source.lines().enumerate() {
            let Some(idx) = line.find(SIGIL) else {
                continue;
            };

            let word = line[..idx].split_whitespace().last().unwrap_or("");
            let (flagged, marker) = match word.strip_prefix('*') {
                Some(m) => (true, m),
                None => (false, word),
            };
            if marker.is_empty() || !marker.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(GrammarError::Syntax {
                    file: file.to_string(),
                    message: format!("line {}: waymark without a marker", i + 1),
                });
            }

            let mut record = WaymarkRecord::new(file, i + 1, marker);
            record.signals.flagged = flagged;

            let tail = line[idx + SIGIL.len()..].trim().trim_end_matches("-->").trim();
            let mut words = Vec::new();
            for token in tail.split_whitespace() {
                match token.split_once(':') {
                    Some(("ref", canonical)) => record.canonicals.push(canonical.to_string()),
                    Some((kind, target)) => match RelationKind::parse(kind) {
                        Some(kind) => record.relations.push(Relation::new(kind, target)),
                        None => words.push(token),
                    },
                    None => words.push(token),
                }
            }
            record.contents = words.join(" ");
            records.push(record);
        }

        Ok(records)
    }
}
