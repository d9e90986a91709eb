//! Doc-comment extraction and classification.
//!
//! Finds the first documentation block in a file, strips its comment
//! decoration, and decides whether it documents the file itself or the
//! declaration it is attached to. No language parser is involved: block
//! delimiters are located by literal search and the surrounding lines are
//! classified with the per-language tables in [`crate::language`].
//!
//! Supported formats:
//! - JSDoc `/** ... */` (JavaScript, TypeScript)
//! - Python triple-quoted docstrings
//! - Ruby contiguous `#` comment blocks
//! - Rust `///` and `//!` line blocks

mod jsdoc;
mod python;
mod ruby;
mod rust_lang;

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// What a doc block documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocstringKind {
    File,
    Function,
}

impl std::fmt::Display for DocstringKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocstringKind::File => write!(f, "file"),
            DocstringKind::Function => write!(f, "function"),
        }
    }
}

/// Comment syntax of a doc block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocstringFormat {
    Jsdoc,
    Python,
    Ruby,
    RustOuter,
    RustInner,
}

impl DocstringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocstringFormat::Jsdoc => "jsdoc",
            DocstringFormat::Python => "python",
            DocstringFormat::Ruby => "ruby",
            DocstringFormat::RustOuter => "rust-outer",
            DocstringFormat::RustInner => "rust-inner",
        }
    }

    /// Whether a stripped line starts a tag section, ending the summary.
    pub fn is_tag_line(&self, line: &str) -> bool {
        let line = line.trim_start();
        if line.starts_with('@') {
            return true;
        }
        // reST field lists: `:param x:`, `:returns:`
        *self == DocstringFormat::Python
            && line.starts_with(':')
            && line[1..].starts_with(|c: char| c.is_ascii_alphabetic())
    }

    /// Re-apply comment decoration to stripped content, at column zero.
    ///
    /// Extracting the result yields `content` again (after the same
    /// normalization extraction applies: trailing whitespace and blank edge
    /// lines removed).
    pub fn wrap(&self, content: &str) -> String {
        let lines: Vec<&str> = content.lines().collect();
        match self {
            DocstringFormat::Jsdoc => {
                let mut out = String::from("/**\n");
                for line in &lines {
                    if line.is_empty() {
                        out.push_str(" *\n");
                    } else {
                        out.push_str(" * ");
                        out.push_str(line);
                        out.push('\n');
                    }
                }
                out.push_str(" */");
                out
            }
            DocstringFormat::Python => {
                if lines.len() <= 1 {
                    format!("\"\"\"{}\"\"\"", content)
                } else {
                    format!("\"\"\"{}\n\"\"\"", content)
                }
            }
            DocstringFormat::Ruby => prefix_lines(&lines, "#"),
            DocstringFormat::RustOuter => prefix_lines(&lines, "///"),
            DocstringFormat::RustInner => prefix_lines(&lines, "//!"),
        }
    }
}

impl std::fmt::Display for DocstringFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn prefix_lines(lines: &[&str], marker: &str) -> String {
    lines
        .iter()
        .map(|l| {
            if l.is_empty() {
                marker.to_string()
            } else {
                format!("{} {}", marker, l)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A located doc block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocstringInfo {
    pub language: Language,
    pub kind: DocstringKind,
    pub format: DocstringFormat,
    /// The block exactly as it appears in the file.
    pub raw: String,
    /// The block with comment decoration removed.
    pub content: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl DocstringInfo {
    /// One-line summary: the first paragraph, stopping at a tag line.
    pub fn summary(&self) -> String {
        summarize(&self.content, self.format)
    }
}

/// Join the first paragraph of stripped content into one line.
pub fn summarize(content: &str, format: DocstringFormat) -> String {
    let mut parts = Vec::new();
    for line in content.lines().map(str::trim).skip_while(|l| l.is_empty()) {
        if line.is_empty() || format.is_tag_line(line) {
            break;
        }
        parts.push(line);
    }
    parts.join(" ")
}

/// Extract the first doc block of `text`. Returns `None` when there is none
/// or the language has no doc-comment convention here.
pub fn extract_docstring(text: &str, language: Language) -> Option<DocstringInfo> {
    match language {
        Language::JavaScript | Language::TypeScript => jsdoc::extract(text, language),
        Language::Python => python::extract(text),
        Language::Ruby => ruby::extract(text),
        Language::Rust => rust_lang::extract(text),
        Language::Go | Language::Markdown | Language::Shell => None,
    }
}

/// Byte span `(start, end)` of every line, `end` excluding the terminator.
pub(crate) fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            let end = if i > start && text.as_bytes()[i - 1] == b'\r' {
                i - 1
            } else {
                i
            };
            spans.push((start, end));
            start = i + 1;
        }
    }
    if start < text.len() {
        spans.push((start, text.len()));
    }
    spans
}

/// Remove blank lines at both ends and trailing whitespace on every line.
pub(crate) fn normalize_lines(lines: Vec<String>) -> String {
    let lines: Vec<String> = lines.into_iter().map(|l| l.trim_end().to_string()).collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(a), Some(b)) => lines[a..=b].join("\n"),
        _ => String::new(),
    }
}

/// Whether a comment line is a waymark rather than prose.
pub(crate) fn is_waymark_comment(line: &str) -> bool {
    line.contains(crate::record::SIGIL)
}
