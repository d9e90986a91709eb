//! Host languages understood by the comment-structure scanners.
//!
//! Each variant carries its rule set as data: file extensions, owner
//! keywords, and tag prefixes. Adding a language means adding a variant and
//! filling in these tables, not new branching in the scanners.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A host language with known preamble and doc-comment conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Ruby,
    Rust,
    Go,
    Markdown,
    Shell,
}

/// Every supported language, in display order.
pub const ALL_LANGUAGES: &[Language] = &[
    Language::JavaScript,
    Language::TypeScript,
    Language::Python,
    Language::Ruby,
    Language::Rust,
    Language::Go,
    Language::Markdown,
    Language::Shell,
];

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::Markdown => "markdown",
            Language::Shell => "shell",
        }
    }

    /// File extensions associated with this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
            Language::TypeScript => &["ts", "tsx", "mts", "cts"],
            Language::Python => &["py", "pyi"],
            Language::Ruby => &["rb", "rake", "gemspec"],
            Language::Rust => &["rs"],
            Language::Go => &["go"],
            Language::Markdown => &["md", "mdx", "markdown"],
            Language::Shell => &["sh", "bash", "zsh"],
        }
    }

    /// Determine the language from a bare file extension (no dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        ALL_LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Determine the language of a path from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Parse a language identifier: a canonical name, a common alias, or an
    /// extension.
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" | "node" => Some(Language::JavaScript),
            "typescript" | "ts" => Some(Language::TypeScript),
            "python" | "py" => Some(Language::Python),
            "ruby" | "rb" => Some(Language::Ruby),
            "rust" | "rs" => Some(Language::Rust),
            "go" | "golang" => Some(Language::Go),
            "markdown" | "md" => Some(Language::Markdown),
            "shell" | "sh" | "bash" | "zsh" => Some(Language::Shell),
            other => Self::from_extension(other),
        }
    }

    /// Keywords whose presence at the start of a line introduces an owner
    /// (a declaration a doc comment can attach to).
    pub fn owner_keywords(&self) -> &'static [&'static str] {
        match self {
            Language::JavaScript | Language::TypeScript => &[
                "export",
                "function",
                "class",
                "const",
                "let",
                "var",
                "async",
                "interface",
                "type",
                "enum",
                "abstract",
                "declare",
                "namespace",
                "module",
            ],
            Language::Python => &["def", "class", "async"],
            Language::Ruby => &[
                "def",
                "class",
                "module",
                "attr_reader",
                "attr_writer",
                "attr_accessor",
            ],
            Language::Rust => &[
                "fn",
                "pub",
                "struct",
                "enum",
                "trait",
                "impl",
                "mod",
                "type",
                "const",
                "static",
                "unsafe",
                "async",
                "extern",
                "union",
                "macro_rules!",
            ],
            Language::Go => &["func", "type", "var", "const"],
            Language::Markdown | Language::Shell => &[],
        }
    }

    /// Whether `line` opens an owner declaration for this language.
    pub fn is_owner_line(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let mut word = trimmed
            .split(|c: char| c.is_whitespace() || c == '(' || c == '{' || c == '<')
            .next()
            .unwrap_or("");

        // Ruby visibility modifiers may prefix a def on the same line.
        if *self == Language::Ruby && matches!(word, "private" | "protected" | "public") {
            word = trimmed[word.len()..]
                .split_whitespace()
                .next()
                .unwrap_or("");
        }

        !word.is_empty() && self.owner_keywords().contains(&word)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse(s).ok_or_else(|| format!("unsupported language: {}", s))
    }
}
