//! Table stores.
//!
//! The engine reads tables through [`TableStore`] and never writes to them.
//! [`Database`] is the owned store used by the CLI and the tests; it can be
//! loaded from a JSON document of the form
//!
//! ```json
//! {
//!   "movie":    [{ "id": 1, "name": "Avatar", "directorID": 1 }],
//!   "director": [{ "id": 1, "name": "James Cameron" }]
//! }
//! ```
//!
//! Records must be flat: every field holds a string, number, boolean or null.

use std::{
    collections::{BTreeMap, HashMap},
    io::Read,
    sync::Arc,
};

use thiserror::Error;
use tracing::debug;

use crate::value::{Row, Table, Value};

/// Read access to named tables.
pub trait TableStore {
    /// The stored rows of `name`, unqualified, or `None` if there is no such
    /// table.
    fn table(&self, name: &str) -> Option<&Table>;
}

impl TableStore for HashMap<String, Table> {
    fn table(&self, name: &str) -> Option<&Table> {
        self.get(name)
    }
}

impl TableStore for BTreeMap<String, Table> {
    fn table(&self, name: &str) -> Option<&Table> {
        self.get(name)
    }
}

impl<T: TableStore + ?Sized> TableStore for &T {
    fn table(&self, name: &str) -> Option<&Table> {
        (**self).table(name)
    }
}

impl<T: TableStore + ?Sized> TableStore for Arc<T> {
    fn table(&self, name: &str) -> Option<&Table> {
        (**self).table(name)
    }
}

/// Errors that can occur while loading a [`Database`] from JSON.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document root is not an object of tables
    #[error("Database must be a JSON object mapping table names to arrays of records")]
    NotAnObject,

    #[error("Table '{0}' must be an array of records")]
    NotATable(String),

    #[error("Row {index} of table '{table}' is not an object")]
    NotARecord { table: String, index: usize },

    #[error("Column '{column}' of table '{table}' holds a nested array or object")]
    NonScalar { table: String, column: String },
}

/// An owned, in-memory set of named tables.
///
/// ```
/// use quill_sql::{Database, Row, Value};
///
/// let mut db = Database::new();
/// db.insert("director", vec![Row::from_pairs([("id", Value::from(1)), ("name", Value::from("Sam Mendes"))])]);
///
/// assert_eq!(db.table_names().collect::<Vec<_>>(), vec!["director"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    tables: BTreeMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) -> Option<Table> {
        self.tables.insert(name.into(), table)
    }

    pub fn remove(&mut self, name: &str) -> Option<Table> {
        self.tables.remove(name)
    }

    /// Table names in sorted order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Self::from_json(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, StoreError> {
        Self::from_json(serde_json::from_reader(reader)?)
    }

    /// Build a database from an already parsed JSON document.
    pub fn from_json(json: serde_json::Value) -> Result<Self, StoreError> {
        let serde_json::Value::Object(tables) = json else {
            return Err(StoreError::NotAnObject);
        };

        let mut db = Database::new();
        for (name, rows) in tables {
            let serde_json::Value::Array(rows) = rows else {
                return Err(StoreError::NotATable(name));
            };

            let table = rows
                .into_iter()
                .enumerate()
                .map(|(index, record)| json_to_row(&name, index, record))
                .collect::<Result<Table, _>>()?;

            debug!(table = %name, rows = table.len(), "loaded table");
            db.insert(name, table);
        }
        Ok(db)
    }
}

impl TableStore for Database {
    fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }
}

impl FromIterator<(String, Table)> for Database {
    fn from_iter<I: IntoIterator<Item = (String, Table)>>(iter: I) -> Self {
        Database {
            tables: iter.into_iter().collect(),
        }
    }
}

fn json_to_row(table: &str, index: usize, record: serde_json::Value) -> Result<Row, StoreError> {
    let serde_json::Value::Object(fields) = record else {
        return Err(StoreError::NotARecord {
            table: table.to_string(),
            index,
        });
    };

    fields
        .into_iter()
        .map(|(column, v)| match json_to_value(v) {
            Some(value) => Ok((column, value)),
            None => Err(StoreError::NonScalar {
                table: table.to_string(),
                column,
            }),
        })
        .collect()
}

/// Convert a scalar JSON value. Arrays and objects have no [`Value`]
/// counterpart.
pub fn json_to_value(v: serde_json::Value) -> Option<Value> {
    match v {
        serde_json::Value::Null => Some(Value::Null),
        serde_json::Value::Bool(b) => Some(Value::Boolean(b)),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
        serde_json::Value::String(s) => Some(Value::String(s)),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
}
