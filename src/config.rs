//! Configuration for waymark checks.
//!
//! Read from `waymark.yaml` (or `.waymark.yaml`, `.waymark/config.yaml`).
//! Every field is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::check::CheckOptions;
use crate::summary::CheckMode;

/// Config file names searched for, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["waymark.yaml", ".waymark.yaml", ".waymark/config.yaml"];

/// A summary waymark below this line is reported as misplaced.
pub const DEFAULT_TLDR_MAX_LINE: usize = 20;

/// Markdown files get more room: front matter and a title usually come first.
pub const DEFAULT_TLDR_MAX_LINE_MARKDOWN: usize = 50;

/// Characters of a flagged waymark shown in its remediation hint.
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Fail on warnings as well as errors.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub tldr: TldrConfig,
    #[serde(default)]
    pub signals: SignalsConfig,
    #[serde(default)]
    pub grammar: GrammarConfig,
    /// Glob patterns for paths to leave out of a scan (e.g. "**/vendor/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Descend into dot-directories.
    #[serde(default)]
    pub include_hidden: bool,
}

/// Placement rules for summary waymarks.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TldrConfig {
    #[serde(default = "default_tldr_max_line")]
    pub max_line: usize,
    #[serde(default = "default_tldr_max_line_markdown")]
    pub max_line_markdown: usize,
}

impl Default for TldrConfig {
    fn default() -> Self {
        Self {
            max_line: DEFAULT_TLDR_MAX_LINE,
            max_line_markdown: DEFAULT_TLDR_MAX_LINE_MARKDOWN,
        }
    }
}

fn default_tldr_max_line() -> usize {
    DEFAULT_TLDR_MAX_LINE
}

fn default_tldr_max_line_markdown() -> usize {
    DEFAULT_TLDR_MAX_LINE_MARKDOWN
}

/// Signal hygiene settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignalsConfig {
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

fn default_preview_length() -> usize {
    DEFAULT_PREVIEW_LENGTH
}

/// The external program that parses waymarks.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GrammarConfig {
    /// Program and arguments. Source arrives on stdin; a JSON record list is
    /// expected on stdout.
    #[serde(default)]
    pub command: Vec<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Find a config file in `dir`.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|p| p.is_file())
    }

    /// Load the config at `path`, or the discovered one in `dir`, or defaults.
    pub fn load(path: Option<&Path>, dir: &Path) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let found = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::discover(dir),
        };
        match found {
            Some(p) => {
                let config = Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// The pass/fail mode this config asks for.
    pub fn mode(&self) -> CheckMode {
        if self.strict {
            CheckMode::Strict
        } else {
            CheckMode::Default
        }
    }

    /// Validator thresholds.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            tldr_max_line: self.tldr.max_line,
            tldr_max_line_markdown: self.tldr.max_line_markdown,
            preview_length: self.signals.preview_length,
        }
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    /// Uses globset for matching, which supports `**` for recursive directory matching.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Validate a config.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.tldr.max_line == 0 || config.tldr.max_line_markdown == 0 {
        anyhow::bail!("tldr line thresholds must be at least 1");
    }

    if config.signals.preview_length == 0 {
        anyhow::bail!("signals.preview_length must be at least 1");
    }

    if config.grammar.command.iter().any(|arg| arg.trim().is_empty()) {
        anyhow::bail!("grammar.command must not contain empty arguments");
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
strict: true
tldr:
  max_line: 10
signals:
  preview_length: 30
grammar:
  command: ["waymark-parse", "--json"]
excluded_paths:
  - "**/vendor/**"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.strict);
        assert_eq!(config.tldr.max_line, 10);
        assert_eq!(config.tldr.max_line_markdown, DEFAULT_TLDR_MAX_LINE_MARKDOWN);
        assert_eq!(config.signals.preview_length, 30);
        assert_eq!(config.grammar.command.len(), 2);
        assert_eq!(config.mode(), CheckMode::Strict);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        let options = config.check_options();
        assert_eq!(options.tldr_max_line, DEFAULT_TLDR_MAX_LINE);
        assert_eq!(options.preview_length, DEFAULT_PREVIEW_LENGTH);
        assert_eq!(config.mode(), CheckMode::Default);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.tldr.max_line = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.excluded_paths = vec!["[".to_string()];
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.grammar.command = vec!["parse".to_string(), " ".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_is_path_excluded() {
        let config = Config {
            excluded_paths: vec!["**/generated/**".to_string()],
            ..Default::default()
        };
        assert!(config.is_path_excluded(Path::new("src/generated/api.ts")));
        assert!(!config.is_path_excluded(Path::new("src/api.ts")));
    }

    #[test]
    fn test_discover_and_load() {
        let temp = TempDir::new().unwrap();
        let (config, path) = Config::load(None, temp.path()).unwrap();
        assert!(path.is_none());
        assert!(!config.strict);

        std::fs::write(temp.path().join(".waymark.yaml"), "strict: true\n").unwrap();
        let (config, path) = Config::load(None, temp.path()).unwrap();
        assert!(config.strict);
        assert!(path.unwrap().ends_with(".waymark.yaml"));
    }
}
