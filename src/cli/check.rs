//! Parse and execute queries against a JSON database

use super::CliError;
use crate::{Database, Engine, Parser, Query, Table};

/// Options for the query and parse commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to run
    pub query: String,
    /// JSON database document
    pub database: Option<String>,
    /// Only parse, don't execute
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The query parsed; carries its AST
    Parsed(Query),
    /// The query ran; carries the result rows
    Rows(Table),
}

impl CheckResult {
    /// Render as JSON, the way the binary prints it.
    pub fn to_json(&self, pretty: bool) -> Result<String, CliError> {
        let json = match (self, pretty) {
            (CheckResult::Parsed(query), true) => serde_json::to_string_pretty(query),
            (CheckResult::Parsed(query), false) => serde_json::to_string(query),
            (CheckResult::Rows(rows), true) => serde_json::to_string_pretty(rows),
            (CheckResult::Rows(rows), false) => serde_json::to_string(rows),
        }?;
        Ok(json)
    }
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let parser = Parser::new();
    let query = parser.parse(&options.query)?;

    if options.syntax_only {
        return Ok(CheckResult::Parsed(query));
    }

    let json = options.database.as_ref().ok_or(CliError::NoDatabase)?;
    let db = Database::from_json_str(json)?;

    let engine = Engine::with_parser(db, parser);
    let rows = engine.execute_query(&query)?;
    Ok(CheckResult::Rows(rows))
}
