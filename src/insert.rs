//! Safe insertion point for a new top-level waymark.
//!
//! The first line after a file's preamble (shebang, front matter, language
//! directives) is where a summary waymark can go without breaking the host
//! language. Files that already carry a summary are never eligible.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{self, FrontMatter};
use crate::grammar::Grammar;
use crate::language::Language;
use crate::record::SUMMARY_MARKER;

/// Why a file has no safe insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnsafeReason {
    UnsupportedLanguage,
    ExistingSummary,
    UnterminatedFrontMatter,
    GrammarFailure,
}

impl UnsafeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnsafeReason::UnsupportedLanguage => "unsupported language",
            UnsafeReason::ExistingSummary => "file already has a tldr waymark",
            UnsafeReason::UnterminatedFrontMatter => "front matter is never closed",
            UnsafeReason::GrammarFailure => "existing waymarks could not be parsed",
        }
    }
}

impl std::fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 1-indexed insertion line, or the reason none exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum InsertionPoint {
    Line { line: usize },
    Unsafe { reason: UnsafeReason },
}

impl InsertionPoint {
    pub fn line(&self) -> Option<usize> {
        match self {
            InsertionPoint::Line { line } => Some(*line),
            InsertionPoint::Unsafe { .. } => None,
        }
    }

    pub fn is_unsafe(&self) -> bool {
        matches!(self, InsertionPoint::Unsafe { .. })
    }

    fn unsafe_because(reason: UnsafeReason) -> Self {
        InsertionPoint::Unsafe { reason }
    }
}

/// Locate the line at which a new summary waymark may be inserted.
///
/// `language` is `None` when the caller could not identify one.
pub fn find_insertion_point(
    text: &str,
    language: Option<Language>,
    file: &str,
    grammar: &dyn Grammar,
) -> InsertionPoint {
    let Some(language) = language else {
        return InsertionPoint::unsafe_because(UnsafeReason::UnsupportedLanguage);
    };

    match grammar.contains_marker(text, file, SUMMARY_MARKER) {
        Ok(true) => return InsertionPoint::unsafe_because(UnsafeReason::ExistingSummary),
        Ok(false) => {}
        Err(e) => {
            debug!(file, error = %e, "cannot rule out an existing summary");
            return InsertionPoint::unsafe_because(UnsafeReason::GrammarFailure);
        }
    }

    match preamble_end(text, language) {
        Some(cursor) => InsertionPoint::Line { line: cursor + 1 },
        None => InsertionPoint::unsafe_because(UnsafeReason::UnterminatedFrontMatter),
    }
}

/// Index of the first line after the preamble, or `None` when the front
/// matter is never closed.
pub fn preamble_end(text: &str, language: Language) -> Option<usize> {
    let lines = classify::split_lines(text);
    let mut cursor = 0;

    if lines.first().is_some_and(|l| classify::is_shebang(l)) {
        cursor += 1;
    }

    match classify::scan_front_matter(&lines, cursor) {
        FrontMatter::Absent => {}
        FrontMatter::Closed { next } => cursor = next,
        FrontMatter::Unterminated => return None,
    }

    Some(classify::skip_directives(language, &lines, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarError;
    use crate::record::WaymarkRecord;

    /// Treats every line containing `tldr :::` as a summary waymark.
    struct LineGrammar;

    impl Grammar for LineGrammar {
        fn parse(&self, source: &str, file: &str) -> Result<Vec<WaymarkRecord>, GrammarError> {
            Ok(source
                .lines()
                .enumerate()
                .filter(|(_, l)| l.contains("tldr :::"))
                .map(|(i, _)| WaymarkRecord::new(file, i + 1, "tldr"))
                .collect())
        }
    }

    struct BrokenGrammar;

    impl Grammar for BrokenGrammar {
        fn parse(&self, _source: &str, file: &str) -> Result<Vec<WaymarkRecord>, GrammarError> {
            Err(GrammarError::Syntax {
                file: file.to_string(),
                message: "unbalanced".to_string(),
            })
        }
    }

    fn point(text: &str, lang: Language) -> InsertionPoint {
        find_insertion_point(text, Some(lang), "f", &LineGrammar)
    }

    #[test]
    fn test_plain_file_inserts_at_line_one() {
        assert_eq!(point("const a = 1;\n", Language::JavaScript).line(), Some(1));
        assert_eq!(point("def main():\n    pass\n", Language::Python).line(), Some(1));
        assert_eq!(point("", Language::Rust).line(), Some(1));
    }

    #[test]
    fn test_unsupported_language_is_unsafe() {
        let p = find_insertion_point("x", None, "f", &LineGrammar);
        assert_eq!(
            p,
            InsertionPoint::Unsafe {
                reason: UnsafeReason::UnsupportedLanguage
            }
        );
    }

    #[test]
    fn test_existing_summary_is_unsafe() {
        let text = "#!/usr/bin/env python3\n# tldr ::: entry point\nimport os\n";
        assert_eq!(
            point(text, Language::Python),
            InsertionPoint::Unsafe {
                reason: UnsafeReason::ExistingSummary
            }
        );
    }

    #[test]
    fn test_grammar_failure_is_unsafe() {
        let p = find_insertion_point("x", Some(Language::Go), "f", &BrokenGrammar);
        assert_eq!(
            p,
            InsertionPoint::Unsafe {
                reason: UnsafeReason::GrammarFailure
            }
        );
    }

    #[test]
    fn test_front_matter() {
        assert_eq!(
            point("---\ntitle: X\n---\n\n# H", Language::Markdown).line(),
            Some(4)
        );
        assert!(point("---\ntitle: X", Language::Markdown).is_unsafe());
        // Only front matter: the line after the closing delimiter, past EOF.
        assert_eq!(point("---\na: 1\n---\n", Language::Markdown).line(), Some(4));
    }

    #[test]
    fn test_shebang_then_directives() {
        let text = "#!/usr/bin/env node\n'use strict';\n// @ts-check\nconst x = 1;\n";
        assert_eq!(point(text, Language::JavaScript).line(), Some(4));
    }

    #[test]
    fn test_typescript_reference_directives() {
        let text = "/// <reference types=\"node\" />\n\"use client\"\nexport {}\n";
        assert_eq!(point(text, Language::TypeScript).line(), Some(3));
    }

    #[test]
    fn test_python_encoding_after_shebang() {
        let text = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\n\"\"\"Doc.\"\"\"\n";
        assert_eq!(point(text, Language::Python).line(), Some(3));
    }

    #[test]
    fn test_ruby_magic_comments() {
        let text = "# frozen_string_literal: true\n# typed: true\nclass User; end\n";
        assert_eq!(point(text, Language::Ruby).line(), Some(3));
    }

    #[test]
    fn test_rust_inner_attributes() {
        let text = "#![deny(missing_docs)]\n#![allow(\n    dead_code\n)]\nuse std::io;\n";
        assert_eq!(point(text, Language::Rust).line(), Some(5));
    }

    #[test]
    fn test_bracket_inside_attribute_string() {
        let text = "#![doc = \"[\"]\nuse std::io;\n\nfn main() {}\n";
        assert_eq!(point(text, Language::Rust).line(), Some(2));
    }

    #[test]
    fn test_python_comment_after_encoding_lines() {
        let text = "#!/usr/bin/env python\n# coding: utf-8\n# handle encoding=utf8 input\nimport os\n";
        assert_eq!(point(text, Language::Python).line(), Some(3));
    }

    #[test]
    fn test_go_build_tags() {
        let text = "//go:build linux\n// +build linux\n\npackage main\n";
        assert_eq!(point(text, Language::Go).line(), Some(4));

        // Without build tags the leading blank line is not preamble.
        assert_eq!(point("\npackage main\n", Language::Go).line(), Some(1));
    }

    #[test]
    fn test_shell_only_skips_shebang() {
        let text = "#!/bin/sh\n# -*- coding: utf-8 -*-\necho hi\n";
        assert_eq!(point(text, Language::Shell).line(), Some(2));
    }
}
