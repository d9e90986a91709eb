//! Waymark CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use waymark_lint::cli::{self, Cli, Commands, EXIT_ERROR};

/// Environment variable holding the log filter (e.g. `waymark_lint=debug`).
const LOG_ENV_VAR: &str = "WAYMARK_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so JSON on stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => cli::run_check(&args),
        Commands::InsertPoint(args) => cli::run_insert_point(&args),
        Commands::Docstring(args) => cli::run_docstring(&args),
        Commands::Init(args) => cli::run_init(&args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
