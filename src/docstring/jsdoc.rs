//! JSDoc blocks for JavaScript and TypeScript.

use super::{is_waymark_comment, normalize_lines, DocstringFormat, DocstringInfo, DocstringKind};
use crate::classify::{self, line_at, line_end, line_start};
use crate::language::Language;

/// Tags that mark a block as file or module documentation.
const FILE_TAGS: &[&str] = &[
    "@file",
    "@fileoverview",
    "@overview",
    "@module",
    "@packageDocumentation",
];

pub(super) fn extract(text: &str, language: Language) -> Option<DocstringInfo> {
    let open = find_open(text)?;
    let close = open + 3 + text[open + 3..].find("*/")?;
    let end = close + 2;

    let raw = &text[open..end];
    let content = strip(raw);
    let kind = classify_block(text, open, end, &content, language);

    Some(DocstringInfo {
        language,
        kind,
        format: DocstringFormat::Jsdoc,
        raw: raw.to_string(),
        content,
        start_line: line_at(text, open),
        end_line: line_at(text, close),
    })
}

/// Offset of the first `/**` that starts a line (after indentation). `/**/`
/// is an empty block comment and `/***` opens a banner; both are skipped.
fn find_open(text: &str) -> Option<usize> {
    let mut from = 0;
    loop {
        let idx = from + text[from..].find("/**")?;
        from = idx + 3;
        if text[idx + 3..].starts_with(|c: char| c == '/' || c == '*') {
            continue;
        }
        if text[line_start(text, idx)..idx].trim().is_empty() {
            return Some(idx);
        }
    }
}

fn strip(raw: &str) -> String {
    let inner = &raw[3..raw.len() - 2];
    let lines = inner
        .lines()
        .map(|line| {
            let t = line.trim();
            match t.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).to_string(),
                None => t.to_string(),
            }
        })
        .collect();
    normalize_lines(lines)
}

fn classify_block(
    text: &str,
    open: usize,
    end: usize,
    content: &str,
    language: Language,
) -> DocstringKind {
    if content.split_whitespace().any(|w| FILE_TAGS.contains(&w)) {
        return DocstringKind::File;
    }

    if following_line(text, end).is_some_and(|l| language.is_owner_line(l)) {
        return DocstringKind::Function;
    }

    if is_preamble_prefix(&text[..line_start(text, open)], language) {
        DocstringKind::File
    } else {
        DocstringKind::Function
    }
}

/// The code that immediately follows the block: the rest of its closing line
/// if non-blank, otherwise the next line, skipping decorator lines.
fn following_line(text: &str, end: usize) -> Option<&str> {
    let rest = &text[end..line_end(text, end)];
    if !rest.trim().is_empty() {
        return Some(rest);
    }

    let after = text.get(line_end(text, end) + 1..)?;
    after.lines().find(|l| !l.trim_start().starts_with('@'))
}

/// Whether everything before the block is blank lines, a shebang, line
/// comments, block comments, or language directives.
fn is_preamble_prefix(prefix: &str, language: Language) -> bool {
    let mut in_block = false;

    for line in prefix.lines() {
        let mut t = line.trim();

        if in_block {
            match t.find("*/") {
                Some(i) => {
                    in_block = false;
                    t = t[i + 2..].trim();
                }
                None => continue,
            }
        }

        while let Some(body) = t.strip_prefix("/*") {
            match body.find("*/") {
                Some(i) => t = body[i + 2..].trim(),
                None => {
                    in_block = true;
                    t = "";
                }
            }
        }

        if t.is_empty()
            || t.starts_with("//")
            || classify::is_shebang(t)
            || is_waymark_comment(t)
            || classify::is_directive(language, t)
        {
            continue;
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_ts(text: &str) -> DocstringInfo {
        extract(text, Language::TypeScript).expect("jsdoc block")
    }

    #[test]
    fn test_file_tag_wins_over_following_declaration() {
        let doc = extract_ts("/**\n * @fileoverview Router setup.\n */\nexport function route() {}\n");
        assert_eq!(doc.kind, DocstringKind::File);
        assert_eq!(doc.start_line, 1);
        assert_eq!(doc.end_line, 3);
    }

    #[test]
    fn test_function_doc_followed_by_declaration() {
        let doc = extract_ts("/**\n * Adds numbers.\n * @param a\n */\nexport function add(a: number) {}\n");
        assert_eq!(doc.kind, DocstringKind::Function);
        assert_eq!(doc.content, "Adds numbers.\n@param a");
        assert_eq!(doc.summary(), "Adds numbers.");
    }

    #[test]
    fn test_preamble_only_prefix_is_file_level() {
        let text = "#!/usr/bin/env node\n// Copyright 2024\n/* license */\n'use strict';\n/**\n * CLI bootstrap.\n */\n\nimport x from 'y';\n";
        let doc = extract(text, Language::JavaScript).unwrap();
        assert_eq!(doc.kind, DocstringKind::File);
        assert_eq!(doc.start_line, 5);
        assert_eq!(doc.summary(), "CLI bootstrap.");
    }

    #[test]
    fn test_code_before_block_defaults_to_function() {
        let text = "const a = 1;\n/**\n * Something.\n */\n\nfoo();\n";
        assert_eq!(extract_ts(text).kind, DocstringKind::Function);
    }

    #[test]
    fn test_decorators_are_skipped_when_finding_the_owner() {
        let text = "/**\n * Service.\n */\n@Injectable()\nexport class Service {}\n";
        assert_eq!(extract_ts(text).kind, DocstringKind::Function);
    }

    #[test]
    fn test_single_line_block_with_trailing_code() {
        let doc = extract_ts("/** Quick helper */ function quick() {}\n");
        assert_eq!(doc.content, "Quick helper");
        assert_eq!(doc.kind, DocstringKind::Function);
    }

    #[test]
    fn test_empty_block_comment_and_inline_marker_are_skipped() {
        let text = "/**/\nconst s = \"/** not docs */\";\n/** Real. */\n";
        let doc = extract_ts(text);
        assert_eq!(doc.content, "Real.");
        assert_eq!(doc.start_line, 3);
    }

    #[test]
    fn test_banner_comment_is_not_jsdoc() {
        let text = "/***************\n * section\n ***************/\n\n/** Real doc. */\nfunction f() {}\n";
        let doc = extract(text, Language::JavaScript).unwrap();
        assert_eq!(doc.start_line, 5);
        assert_eq!(doc.content, "Real doc.");
        assert_eq!(doc.kind, DocstringKind::Function);

        assert!(extract("/*** banner ***/\nconst x = 1;\n", Language::JavaScript).is_none());
    }

    #[test]
    fn test_unterminated_block() {
        assert!(extract("/**\n * never closed\n", Language::JavaScript).is_none());
        assert!(extract("const x = 1;\n", Language::JavaScript).is_none());
    }

    #[test]
    fn test_multiline_block_comment_in_prefix() {
        let text = "/*\n * Copyright\n * Apache-2.0\n */\n/**\n * Module helpers.\n */\n";
        assert_eq!(extract_ts(text).kind, DocstringKind::File);
    }
}
