//! Line and block classification for language preambles.
//!
//! Recognizes the constructs that must stay at the very top of a file:
//! shebangs, front matter, encoding and magic comments, JS/TS directives,
//! Rust inner attributes and Go build tags. Every predicate is a pure
//! function over borrowed text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::language::Language;

/// Delimiters that open and close a front-matter block.
pub const FRONT_MATTER_DELIMITERS: &[&str] = &["---", "+++"];

lazy_static! {
    /// JS/TS preamble: triple-slash directives, ts-check pragmas, and
    /// string-literal directives.
    static ref JS_DIRECTIVES: Vec<Regex> = vec![
        Regex::new(r"^\s*///\s*<(?:reference|amd-module|amd-dependency)\b").unwrap(),
        Regex::new(r"^\s*//\s*@ts-(?:check|nocheck)\b").unwrap(),
        Regex::new(r"^\s*/\*\s*@ts-(?:check|nocheck)\s*\*/\s*$").unwrap(),
        Regex::new(r#"^\s*(?:"use (?:strict|client|server)"|'use (?:strict|client|server)')\s*;?\s*$"#).unwrap(),
    ];

    /// Python encoding declarations (PEP 263 forms, including the emacs
    /// `-*- coding: x -*-` and vim `fileencoding=x` variants).
    static ref PYTHON_DIRECTIVES: Vec<Regex> = vec![
        Regex::new(r"^[ \t\f]*#.*?coding[:=][ \t]*[-_.a-zA-Z0-9]+").unwrap(),
    ];

    /// Ruby magic comments.
    static ref RUBY_DIRECTIVES: Vec<Regex> = vec![
        Regex::new(r"(?i)^\s*#\s*(?:-\*-\s*)?(?:frozen[_-]string[_-]literal|encoding|coding|warn[_-]indent|shareable[_-]constant[_-]value|typed)\s*[:=]").unwrap(),
    ];

    /// Go build constraints, current and legacy syntax.
    static ref GO_BUILD_TAG: Regex = Regex::new(r"^\s*(?://go:build\b|//\s*\+build\b)").unwrap();

    static ref NO_DIRECTIVES: Vec<Regex> = Vec::new();
}

/// Outcome of looking for a front-matter block at a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatter {
    /// No opening delimiter at the cursor.
    Absent,
    /// A closed block; `next` is the index of the line after the closing
    /// delimiter.
    Closed { next: usize },
    /// Opening delimiter without a matching close before end of file.
    Unterminated,
}

/// Split text into lines. A single trailing empty line produced by a final
/// line terminator is not reported; `\r\n` endings are normalized.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Whether a line is a shebang. Rust inner attributes (`#![...]`) share the
/// prefix and are excluded.
pub fn is_shebang(line: &str) -> bool {
    line.starts_with("#!") && !line.starts_with("#![")
}

/// Look for a front-matter block starting at `start`.
pub fn scan_front_matter(lines: &[&str], start: usize) -> FrontMatter {
    let Some(open) = lines.get(start).map(|l| l.trim_end()) else {
        return FrontMatter::Absent;
    };
    if !FRONT_MATTER_DELIMITERS.contains(&open) {
        return FrontMatter::Absent;
    }

    lines[start + 1..]
        .iter()
        .position(|l| l.trim_end() == open)
        .map(|offset| FrontMatter::Closed {
            next: start + 1 + offset + 1,
        })
        .unwrap_or(FrontMatter::Unterminated)
}

/// Line-level directive patterns for a language.
fn directive_patterns(language: Language) -> &'static [Regex] {
    match language {
        Language::JavaScript | Language::TypeScript => JS_DIRECTIVES.as_slice(),
        Language::Python => PYTHON_DIRECTIVES.as_slice(),
        Language::Ruby => RUBY_DIRECTIVES.as_slice(),
        Language::Rust | Language::Go | Language::Markdown | Language::Shell => {
            NO_DIRECTIVES.as_slice()
        }
    }
}

/// Whether a single line is a recognized directive for the language.
///
/// Rust inner attributes are reported on their opening line only; use
/// [`skip_directives`] to consume multi-line attributes.
pub fn is_directive(language: Language, line: &str) -> bool {
    match language {
        Language::Rust => is_inner_attribute(line),
        Language::Go => is_go_build_tag(line),
        _ => directive_patterns(language).iter().any(|p| p.is_match(line)),
    }
}

/// Whether a line is a Python encoding declaration.
pub fn is_python_encoding(line: &str) -> bool {
    PYTHON_DIRECTIVES.iter().any(|p| p.is_match(line))
}

/// Whether a line is a Ruby magic comment.
pub fn is_ruby_magic_comment(line: &str) -> bool {
    RUBY_DIRECTIVES.iter().any(|p| p.is_match(line))
}

/// Whether a line opens a Rust inner attribute.
pub fn is_inner_attribute(line: &str) -> bool {
    line.trim_start().starts_with("#![")
}

/// Whether a line is a Go build constraint.
pub fn is_go_build_tag(line: &str) -> bool {
    GO_BUILD_TAG.is_match(line)
}

/// PEP 263: an encoding declaration only counts on the first two lines.
const PYTHON_ENCODING_LINES: usize = 2;

/// Advance `start` past every preamble directive recognized for the
/// language, stopping at the first line that is not one. Returns the index of
/// that line.
pub fn skip_directives(language: Language, lines: &[&str], start: usize) -> usize {
    match language {
        Language::Rust => skip_inner_attributes(lines, start),
        Language::Go => skip_build_tags(lines, start),
        _ => {
            let limit = match language {
                Language::Python => lines.len().min(PYTHON_ENCODING_LINES),
                _ => lines.len(),
            };
            let patterns = directive_patterns(language);
            let mut cursor = start;
            while cursor < limit && patterns.iter().any(|p| p.is_match(lines[cursor])) {
                cursor += 1;
            }
            cursor
        }
    }
}

/// Consume `#![...]` attributes, following brackets across lines. Brackets
/// inside string and char literals do not count.
fn skip_inner_attributes(lines: &[&str], start: usize) -> usize {
    let mut cursor = start;
    while cursor < lines.len() && is_inner_attribute(lines[cursor]) {
        let mut scan = BracketScan::default();
        loop {
            scan.feed(lines[cursor]);
            cursor += 1;
            if scan.depth <= 0 || cursor >= lines.len() {
                break;
            }
        }
    }
    cursor
}

/// Bracket depth of attribute text, carried across lines.
#[derive(Debug, Default)]
struct BracketScan {
    depth: i32,
    in_string: bool,
}

impl BracketScan {
    fn feed(&mut self, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if self.in_string {
                match c {
                    '\\' => i += 1,
                    '"' => self.in_string = false,
                    _ => {}
                }
                i += 1;
                continue;
            }
            match c {
                '"' => self.in_string = true,
                '\'' => i += char_literal_len(&chars[i..]).saturating_sub(1),
                '[' => self.depth += 1,
                ']' => self.depth -= 1,
                _ => {}
            }
            i += 1;
        }
    }
}

/// Length of a char literal at the start of `chars` (`'x'`, `'\n'`,
/// `'\u{..}'`), or 1 for a lone quote such as a lifetime.
fn char_literal_len(chars: &[char]) -> usize {
    match chars.get(1) {
        Some('\\') => chars
            .iter()
            .skip(3)
            .position(|&c| c == '\'')
            .map(|p| p + 4)
            .unwrap_or(1),
        Some(_) if chars.get(2) == Some(&'\'') => 3,
        _ => 1,
    }
}

/// Consume build tags and, only when at least one was seen, the single
/// blank line separating them from the package clause.
fn skip_build_tags(lines: &[&str], start: usize) -> usize {
    let mut cursor = start;
    let mut seen = false;
    while cursor < lines.len() && is_go_build_tag(lines[cursor]) {
        seen = true;
        cursor += 1;
    }
    if seen && cursor < lines.len() && lines[cursor].trim().is_empty() {
        cursor += 1;
    }
    cursor
}

/// Index one past the last line of the contiguous run starting at `start`
/// whose lines all satisfy `pred`.
pub fn contiguous_run<F>(lines: &[&str], start: usize, pred: F) -> usize
where
    F: Fn(&str) -> bool,
{
    let mut end = start;
    while end < lines.len() && pred(lines[end]) {
        end += 1;
    }
    end
}

/// 1-indexed line number of a byte offset.
pub fn line_at(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset.min(text.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Byte offset of the start of the line containing `offset`.
pub fn line_start(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Byte offset just past the end of the line containing `offset` (the
/// position of its `\n`, or the end of text).
pub fn line_end(text: &str, offset: usize) -> usize {
    text[offset.min(text.len())..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(text.len())
}
