//! Interface to the waymark grammar.
//!
//! Tokenizing waymarks is not done here. A [`Grammar`] turns source text into
//! [`WaymarkRecord`]s; the command line binds it to an external program that
//! reads the source on stdin and prints a JSON array of records.

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

use crate::record::WaymarkRecord;

/// Environment variable carrying the scanned path to a grammar program.
pub const FILE_ENV_VAR: &str = "WAYMARK_FILE";

/// Errors raised while parsing waymarks out of a source file.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("{file}: {message}")]
    Syntax { file: String, message: String },
    #[error("failed to run grammar command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("grammar command `{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("grammar output is not a record list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parser for waymark annotations.
pub trait Grammar: Send + Sync {
    /// Parse every waymark in `source`. Each record's `file` is `file`.
    fn parse(&self, source: &str, file: &str) -> Result<Vec<WaymarkRecord>, GrammarError>;

    /// Whether `source` already contains a waymark with the given marker.
    fn contains_marker(&self, source: &str, file: &str, marker: &str) -> Result<bool, GrammarError> {
        Ok(self
            .parse(source, file)?
            .iter()
            .any(|r| r.marker.eq_ignore_ascii_case(marker)))
    }
}

/// Decode the JSON record list emitted by a grammar program, stamping every
/// record with the scanned path.
pub fn decode_records(output: &[u8], file: &str) -> Result<Vec<WaymarkRecord>, GrammarError> {
    let mut records: Vec<WaymarkRecord> = serde_json::from_slice(output)?;
    for record in &mut records {
        record.file = file.to_string();
    }
    Ok(records)
}

/// Grammar backed by an external program.
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    program: String,
    args: Vec<String>,
}

impl CommandGrammar {
    /// Build from an argv; the first element is the program.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Grammar for CommandGrammar {
    fn parse(&self, source: &str, file: &str) -> Result<Vec<WaymarkRecord>, GrammarError> {
        debug!(command = %self.display(), file, "running grammar");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(FILE_ENV_VAR, file)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GrammarError::Spawn {
                command: self.display(),
                source,
            })?;

        let stdin = child.stdin.take();

        // Feed stdin from its own thread while stdout and stderr are drained
        // here; a program that answers before reading everything would
        // otherwise fill its stdout pipe and block both sides.
        let output = std::thread::scope(|scope| {
            if let Some(mut stdin) = stdin {
                scope.spawn(move || {
                    // A program that exits without reading stdin closes the
                    // pipe; its exit status is what gets reported.
                    let _ = stdin.write_all(source.as_bytes());
                });
            }
            child.wait_with_output()
        })
        .map_err(|source| GrammarError::Spawn {
            command: self.display(),
            source,
        })?;

        if !output.status.success() {
            return Err(GrammarError::Failed {
                command: self.display(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        decode_records(&output.stdout, file)
    }
}
