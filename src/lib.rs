//! Waymark - consistency checks for structured code annotations.
//!
//! Waymarks are comments of the form `marker ::: text` carrying canonicals
//! (`#auth/core`), relations (`from:#auth/core`), signals and tags. This
//! crate keeps that layer consistent across a repository.
//!
//! # Architecture
//!
//! Two independent halves share only [`Language`] and [`WaymarkRecord`]:
//!
//! - `classify`, `insert`, `docstring`: comment-structure scanners working on
//!   raw text, one rule table per language
//! - `check`: canonical/relation graph and rule passes over parsed records
//!
//! Around them:
//!
//! - `grammar`: the [`Grammar`] seam turning source into records
//! - `config`: YAML configuration
//! - `summary`, `report`: pass/fail and output formatting (text, JSON)
//! - `cli`: the `waymark` command

pub mod check;
pub mod classify;
pub mod cli;
pub mod config;
pub mod docstring;
pub mod grammar;
pub mod insert;
pub mod language;
pub mod record;
pub mod report;
pub mod summary;

pub use check::{validate, CanonicalGraph, CanonicalIndex, CheckError, CheckIssue, CheckOptions, CheckReport, CheckRule, Checker, Severity};
pub use config::Config;
pub use docstring::{extract_docstring, DocstringFormat, DocstringInfo, DocstringKind};
pub use grammar::{CommandGrammar, Grammar, GrammarError};
pub use insert::{find_insertion_point, InsertionPoint, UnsafeReason};
pub use language::Language;
pub use record::{Relation, RelationKind, Signals, WaymarkRecord};
pub use summary::{CheckMode, Summary};
