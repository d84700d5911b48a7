//! Describe the tables of a JSON database

use serde::Serialize;

use super::CliError;
use crate::Database;

/// One table of a database
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    /// Column names in first-seen order across all rows
    pub columns: Vec<String>,
}

/// List the tables of a JSON database document, sorted by name.
pub fn list_tables(json: &str) -> Result<Vec<TableSummary>, CliError> {
    let db = Database::from_json_str(json)?;

    let summaries = db
        .iter()
        .map(|(name, table)| {
            let mut columns: Vec<String> = Vec::new();
            for key in table.iter().flat_map(|row| row.keys()) {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
            TableSummary {
                name: name.to_string(),
                rows: table.len(),
                columns,
            }
        })
        .collect();

    Ok(summaries)
}
