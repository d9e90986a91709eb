//! Python triple-quoted docstrings.
//!
//! A docstring is only recognized where Python itself would treat one as
//! documentation: at column zero after the module preamble, or as the first
//! statement after a `def`/`class` header.

use super::{line_spans, normalize_lines, DocstringFormat, DocstringInfo, DocstringKind};
use crate::classify::{self, line_at};
use crate::language::Language;

const QUOTES: &[&str] = &["\"\"\"", "'''"];

/// String prefixes allowed on a docstring literal.
const PREFIXES: &[char] = &['r', 'R', 'u', 'U'];

pub(super) fn extract(text: &str) -> Option<DocstringInfo> {
    let spans = line_spans(text);
    let lines: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let Some((quote, prefix_len)) = opening_quote(trimmed) else {
            continue;
        };

        let at_module_level = indent == 0 && is_module_preamble(&lines[..i]);
        let after_header = previous_code_line(&lines[..i]).is_some_and(|l| strip_comment(l).trim_end().ends_with(':'));
        if !at_module_level && !after_header {
            continue;
        }

        let literal_start = spans[i].0 + indent;
        let body_start = literal_start + prefix_len + 3;
        // An unterminated docstring means the rest of the file is a string;
        // nothing after it can be documentation either.
        let close = body_start + text[body_start..].find(quote)?;
        let end = close + 3;

        let owner_before = previous_code_line(&lines[..i]).is_some_and(|l| Language::Python.is_owner_line(l));
        let kind = if at_module_level && !owner_before {
            DocstringKind::File
        } else {
            DocstringKind::Function
        };

        return Some(DocstringInfo {
            language: Language::Python,
            kind,
            format: DocstringFormat::Python,
            raw: text[literal_start..end].to_string(),
            content: strip(&text[body_start..close]),
            start_line: i + 1,
            end_line: line_at(text, close),
        });
    }

    None
}

/// The quote style and the length of any string prefix, when `trimmed`
/// opens a triple-quoted literal.
fn opening_quote(trimmed: &str) -> Option<(&'static str, usize)> {
    let prefix_len = usize::from(trimmed.starts_with(PREFIXES));
    let rest = &trimmed[prefix_len..];
    QUOTES
        .iter()
        .find(|q| rest.starts_with(*q))
        .map(|q| (*q, prefix_len))
}

/// The nearest line above that is neither blank nor a whole-line comment.
fn previous_code_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines
        .iter()
        .rev()
        .find(|l| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .copied()
}

/// `line` without a trailing `#` comment. A `#` inside a string literal
/// does not start one.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return &line[..i],
            None => {}
        }
    }
    line
}

/// Whether `lines` hold only blank lines, a shebang, comments (encoding
/// declarations included) and imports.
fn is_module_preamble(lines: &[&str]) -> bool {
    let mut in_import = false;

    for (i, line) in lines.iter().enumerate() {
        let t = line.trim();

        if in_import {
            if t.contains(')') {
                in_import = false;
            }
            continue;
        }

        if t.is_empty() || t.starts_with('#') || (i == 0 && classify::is_shebang(t)) {
            continue;
        }

        if t.starts_with("import ") || (t.starts_with("from ") && t.contains(" import")) {
            in_import = t.contains('(') && !t.contains(')');
            continue;
        }

        return false;
    }
    true
}

/// PEP 257 trimming: the first line is taken as-is, the rest lose their
/// common indentation.
fn strip(body: &str) -> String {
    let mut lines = body.lines();
    let first = lines.next().unwrap_or("").trim().to_string();
    let rest: Vec<&str> = lines.collect();

    let indent = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = vec![first];
    out.extend(rest.iter().map(|l| l.get(indent..).unwrap_or("").to_string()));
    normalize_lines(out)
}
