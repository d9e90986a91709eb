//! Command-line interface for waymark.

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::check::{collect_files, Checker};
use crate::config::{self, Config};
use crate::docstring::extract_docstring;
use crate::grammar::CommandGrammar;
use crate::insert::{find_insertion_point, InsertionPoint};
use crate::language::Language;
use crate::report;
use crate::summary::{CheckMode, Summary};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Keep waymark annotations consistent across a repository.
///
/// Waymarks are structured comments (`marker ::: text`) embedded in source
/// files. `check` validates canonicals, relations, tldr placement and
/// flagged signals across every file; `insert-point` and `docstring` inspect
/// a single file's comment structure.
#[derive(Parser)]
#[command(name = "waymark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate waymarks across files
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Print the line where a new tldr waymark can be inserted
    InsertPoint(InsertPointArgs),
    /// Print the first doc comment of a file
    Docstring(DocstringArgs),
    /// Create a waymark config from a template
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Fail on warnings too
    #[arg(long)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for the insert-point command.
#[derive(Parser)]
pub struct InsertPointArgs {
    /// File to inspect
    pub file: PathBuf,

    /// Language id, overriding detection by extension
    #[arg(short, long)]
    pub language: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the docstring command.
#[derive(Parser)]
pub struct DocstringArgs {
    /// File to inspect
    pub file: PathBuf,

    /// Language id, overriding detection by extension
    #[arg(short, long)]
    pub language: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "waymark.yaml")]
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long, default_value = "default")]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// Available config templates.
struct Template {
    name: &'static str,
    description: &'static str,
    content: &'static str,
}

/// All available templates.
static TEMPLATES: &[Template] = &[
    Template {
        name: "default",
        description: "Errors fail the check, warnings are reported",
        content: include_str!("templates/default.yaml"),
    },
    Template {
        name: "strict",
        description: "Any issue fails the check, for CI gates",
        content: include_str!("templates/strict.yaml"),
    },
];

/// Load and validate the config, reporting problems on stderr.
fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>), i32> {
    let (config, path) = match Config::load(explicit, Path::new(".")) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Err(EXIT_ERROR);
    }

    Ok((config, path))
}

fn grammar_from(config: &Config) -> Result<CommandGrammar, i32> {
    match CommandGrammar::from_argv(&config.grammar.command) {
        Some(g) => Ok(g),
        None => {
            eprintln!("Error: no grammar command configured");
            eprintln!("Set grammar.command in waymark.yaml (run 'waymark init' to create one)");
            Err(EXIT_ERROR)
        }
    }
}

/// Language from `--language`, else from the file extension.
fn resolve_language(file: &Path, explicit: Option<&str>) -> Result<Option<Language>, i32> {
    match explicit {
        Some(id) => match Language::parse(id) {
            Some(lang) => Ok(Some(lang)),
            None => {
                eprintln!("Error: unknown language {:?}", id);
                Err(EXIT_ERROR)
            }
        },
        None => Ok(Language::from_path(file)),
    }
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!("Error: invalid format {:?}, must be 'pretty' or 'json'", args.format);
        return Ok(EXIT_ERROR);
    }

    let (config, config_path) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return Ok(code),
    };
    let grammar = match grammar_from(&config) {
        Ok(g) => g,
        Err(code) => return Ok(code),
    };

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let base_dir = if metadata.is_dir() {
        args.path.clone()
    } else {
        args.path.parent().map(Path::to_path_buf).unwrap_or_default()
    };

    let files = collect_files(&args.path, &config)?;
    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }
    tracing::debug!(files = files.len(), "collected files");

    let checker = Checker::new(&base_dir, &grammar).options(config.check_options());
    let result = match checker.run(&files) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let mode = if args.strict { CheckMode::Strict } else { config.mode() };
    let path_str = args.path.to_string_lossy().to_string();
    let config_str = config_path.map(|p| p.to_string_lossy().to_string());

    match args.format.as_str() {
        "json" => report::write_json(&path_str, &result, mode)?,
        _ => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            report::write_pretty(&path_str, config_str.as_deref(), &result, mode, color);
        }
    }

    if Summary::from_issues(&result.issues).passed(mode) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the insert-point command.
pub fn run_insert_point(args: &InsertPointArgs) -> anyhow::Result<i32> {
    let language = match resolve_language(&args.file, args.language.as_deref()) {
        Ok(l) => l,
        Err(code) => return Ok(code),
    };
    let (config, _) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(code) => return Ok(code),
    };
    let grammar = match grammar_from(&config) {
        Ok(g) => g,
        Err(code) => return Ok(code),
    };

    let text = std::fs::read_to_string(&args.file)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", args.file.display(), e))?;
    let point = find_insertion_point(&text, language, &args.file.to_string_lossy(), &grammar);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&point)?);
    } else {
        match point {
            InsertionPoint::Line { line } => println!("{}", line),
            InsertionPoint::Unsafe { reason } => eprintln!("no safe insertion point: {}", reason),
        }
    }

    Ok(if point.is_unsafe() { EXIT_FAILED } else { EXIT_SUCCESS })
}

/// Run the docstring command.
pub fn run_docstring(args: &DocstringArgs) -> anyhow::Result<i32> {
    let language = match resolve_language(&args.file, args.language.as_deref()) {
        Ok(Some(l)) => l,
        Ok(None) => {
            eprintln!("Error: cannot tell the language of {}", args.file.display());
            return Ok(EXIT_ERROR);
        }
        Err(code) => return Ok(code),
    };

    let text = std::fs::read_to_string(&args.file)
        .map_err(|e| anyhow::anyhow!("reading {}: {}", args.file.display(), e))?;

    let Some(doc) = extract_docstring(&text, language) else {
        if args.json {
            println!("null");
        } else {
            eprintln!("no doc comment found");
        }
        return Ok(EXIT_FAILED);
    };

    if args.json {
        let mut value = serde_json::to_value(&doc)?;
        value["summary"] = serde_json::Value::String(doc.summary());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "{} {} doc, lines {}-{}",
            doc.format.as_str(),
            doc.kind,
            doc.start_line,
            doc.end_line
        );
        println!("summary: {}", doc.summary());
        println!();
        println!("{}", doc.content);
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // List mode
    if args.list {
        return list_templates();
    }

    let template = match TEMPLATES.iter().find(|t| t.name == args.template) {
        Some(t) => t,
        None => {
            eprintln!("Error: unknown template {:?}", args.template);
            eprintln!("Run 'waymark init --list' to see available templates");
            return Ok(EXIT_ERROR);
        }
    };

    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, template.content) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {} from template '{}'", args.output.display(), template.name);
    println!();
    println!("Next steps:");
    println!("  1. Point grammar.command at your waymark parser");
    println!("  2. Run: waymark check . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

/// List available templates.
fn list_templates() -> anyhow::Result<i32> {
    println!("Available templates:");
    println!();

    for template in TEMPLATES {
        let name = if template.name == "default" {
            format!("{} (default)", template.name)
        } else {
            template.name.to_string()
        };
        println!("  {:<20} {}", name, template.description);
    }

    println!();
    println!("Usage:");
    println!("  waymark init --template <name>");

    Ok(EXIT_SUCCESS)
}
