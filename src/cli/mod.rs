//! CLI support for quill-sql
//!
//! Provides programmatic access to the `quill` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod tables;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use tables::{TableSummary, list_tables};

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Execution error: {0}")]
    Exec(#[from] crate::ExecError),

    #[error("Database error: {0}")]
    Store(#[from] crate::StoreError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No database provided
    #[error("No database provided. Use --db or pipe JSON to stdin.")]
    NoDatabase,
}
