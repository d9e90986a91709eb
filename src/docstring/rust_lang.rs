//! Rust `///` and `//!` doc-comment blocks.

use super::{line_spans, normalize_lines, DocstringFormat, DocstringInfo, DocstringKind};
use crate::classify;
use crate::language::Language;

const OUTER: &str = "///";
const INNER: &str = "//!";

/// Which doc marker a line carries, if any. `////` is an ordinary comment.
fn doc_marker(line: &str) -> Option<&'static str> {
    let t = line.trim_start();
    if t.starts_with(INNER) {
        Some(INNER)
    } else if t.starts_with(OUTER) && !t.starts_with("////") {
        Some(OUTER)
    } else {
        None
    }
}

pub(super) fn extract(text: &str) -> Option<DocstringInfo> {
    let spans = line_spans(text);
    let lines: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();

    let (start, marker) = lines
        .iter()
        .enumerate()
        .find_map(|(i, l)| doc_marker(l).map(|m| (i, m)))?;
    let end = classify::contiguous_run(&lines, start, |l| doc_marker(l) == Some(marker));

    let stripped = lines[start..end]
        .iter()
        .map(|l| {
            let body = &l.trim_start()[marker.len()..];
            body.strip_prefix(' ').unwrap_or(body).to_string()
        })
        .collect();

    let (format, kind) = if marker == INNER {
        (DocstringFormat::RustInner, DocstringKind::File)
    } else {
        let owner_follows = lines[end..]
            .iter()
            .find(|l| !l.trim_start().starts_with("#["))
            .is_some_and(|l| Language::Rust.is_owner_line(l));
        let kind = if !owner_follows && is_preamble_prefix(&lines[..start]) {
            DocstringKind::File
        } else {
            DocstringKind::Function
        };
        (DocstringFormat::RustOuter, kind)
    };

    Some(DocstringInfo {
        language: Language::Rust,
        kind,
        format,
        raw: text[spans[start].0..spans[end - 1].1].to_string(),
        content: normalize_lines(stripped),
        start_line: start + 1,
        end_line: end,
    })
}

/// Blank lines, line comments and inner attributes only.
fn is_preamble_prefix(lines: &[&str]) -> bool {
    let mut i = 0;
    while i < lines.len() {
        let t = lines[i].trim();
        if classify::is_inner_attribute(t) {
            i = classify::skip_directives(Language::Rust, lines, i);
            continue;
        }
        if !(t.is_empty() || t.starts_with("//")) {
            return false;
        }
        i += 1;
    }
    true
}
