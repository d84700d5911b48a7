//! Query execution.
//!
//! A query runs as a strict linear pipeline over virtual tables:
//!
//! 1. **Projection** - copy the FROM table and qualify every column key
//!    (`name` becomes `movie.name`)
//! 2. **Join** - inner-join each JOIN table in source order
//! 3. **Filter** - keep the rows satisfying the WHERE condition
//! 4. **Select** - keep only the requested columns
//!
//! Every stage allocates a fresh table. Nothing is cached between calls and
//! the store is only ever read through copies.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    ast::{CompareOp, Condition, FieldList, Join, Operand, Query},
    parser::{ParseError, Parser, QueryParser},
    store::TableStore,
    value::{Row, Table, Value, qualified_key},
};

/// Errors that can occur while executing a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecError {
    /// The query text could not be parsed
    #[error("{0}")]
    InvalidQuery(#[from] ParseError),

    /// A FROM or JOIN table is missing from the store
    #[error("Table {0} does not exist")]
    TableNotFound(String),
}

/// The query engine: a table store plus the parser used to read queries.
///
/// `execute` only needs `&self`, and neither the engine nor the stages keep
/// any state between calls, so one engine can serve many queries (and
/// threads, if the store is `Sync`).
///
/// # Examples
///
/// ```
/// use quill_sql::{Database, Engine, Row, Value};
///
/// let mut db = Database::new();
/// db.insert("movie", vec![
///     Row::from_pairs([("id", Value::from(1)), ("name", Value::from("Avatar"))]),
///     Row::from_pairs([("id", Value::from(2)), ("name", Value::from("Titanic"))]),
/// ]);
///
/// let engine = Engine::new(db);
/// let rows = engine.execute("SELECT movie.name FROM movie WHERE movie.id = 2").unwrap();
///
/// assert_eq!(rows, vec![Row::from_pairs([("movie.name", Value::from("Titanic"))])]);
/// ```
#[derive(Debug, Clone)]
pub struct Engine<S, P = Parser> {
    store: S,
    parser: P,
}

impl<S: TableStore> Engine<S> {
    /// Create an engine using the standard dialect parser.
    pub fn new(store: S) -> Self {
        Engine {
            store,
            parser: Parser::new(),
        }
    }
}

impl<S: TableStore, P: QueryParser> Engine<S, P> {
    pub fn with_parser(store: S, parser: P) -> Self {
        Engine { store, parser }
    }

    /// Replace the backing store.
    pub fn set_store(&mut self, store: S) {
        self.store = store;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse and run `query`, returning the selected rows in order.
    ///
    /// Fails with [`ExecError::InvalidQuery`] before touching the store if
    /// the text does not parse, and with [`ExecError::TableNotFound`] if any
    /// referenced table is missing. There are no partial results.
    pub fn execute(&self, query: &str) -> Result<Table, ExecError> {
        let ast = self.parser.parse_query(query)?;
        self.execute_query(&ast)
    }

    /// Run an already parsed query.
    pub fn execute_query(&self, query: &Query) -> Result<Table, ExecError> {
        let projected = self.project(&query.select.from)?;

        let joined = query
            .join
            .iter()
            .try_fold(projected, |left, join| self.join(left, join))?;

        let filtered = filter(joined, query.where_clause.as_ref());
        let selected = select(filtered, &query.select.fields);

        debug!(rows = selected.len(), "query executed");
        Ok(selected)
    }

    /// A deep copy of the stored table `name`, or `None` if the store has no
    /// such table.
    pub fn get_table(&self, name: &str) -> Option<Table> {
        self.store.table(name).cloned()
    }

    /// Projection stage: a copy of `table` with every key qualified by the
    /// table name.
    pub fn project(&self, table: &str) -> Result<Table, ExecError> {
        let rows = self
            .get_table(table)
            .ok_or_else(|| ExecError::TableNotFound(table.to_string()))?;

        let projected: Table = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(column, value)| (qualified_key(table, &column), value))
                    .collect::<Row>()
            })
            .collect();

        debug!(table, rows = projected.len(), "projected table");
        Ok(projected)
    }

    /// Join stage: inner-join the projection of `join.table` onto `left`.
    ///
    /// Whichever side of the ON equality names the joined table is matched
    /// against the joined rows; the other side is looked up in `left`. The
    /// result lists, for each left row in order, one merged row per matching
    /// joined row in store order. Left values win on key collisions.
    pub fn join(&self, left: Table, join: &Join) -> Result<Table, ExecError> {
        let right = self.project(&join.table)?;

        let (first, second) = &join.fields;
        let (left_key, right_key) = if join.table == first.table {
            (second.key(), first.key())
        } else {
            (first.key(), second.key())
        };

        let mut joined = Table::new();
        for left_row in &left {
            let join_value = left_row.get(&left_key);

            for right_row in right.iter().filter(|r| r.get(&right_key) == join_value) {
                let mut merged = left_row.clone();
                for (key, value) in right_row.iter() {
                    if !merged.contains_key(key) {
                        merged.insert(key, value.clone());
                    }
                }
                joined.push(merged);
            }
        }

        debug!(
            table = %join.table,
            left_key = %left_key,
            right_key = %right_key,
            rows = joined.len(),
            "joined table"
        );
        Ok(joined)
    }
}

/// Filter stage: keep the rows for which `condition` holds, in order.
/// Without a condition the table passes through unchanged.
pub fn filter(table: Table, condition: Option<&Condition>) -> Table {
    let Some(condition) = condition else {
        return table;
    };

    let before = table.len();
    let filtered: Table = table
        .into_iter()
        .filter(|row| evaluate(condition, row))
        .collect();

    debug!(
        condition = %format!("{} {} {}", describe(&condition.left), condition.operator, describe(&condition.right)),
        before,
        after = filtered.len(),
        "filtered table"
    );
    filtered
}

/// Select stage: reduce every row to the requested columns.
///
/// A wildcard keeps every column of the row, in row order. An explicit
/// column missing from a row comes out as `null`.
pub fn select(table: Table, fields: &FieldList) -> Table {
    let fields = match fields {
        FieldList::Wildcard => return table,
        FieldList::Fields(fields) => fields,
    };

    let keys: Vec<String> = fields.iter().map(|f| f.key()).collect();

    table
        .into_iter()
        .map(|row| {
            keys.iter()
                .map(|key| {
                    let value = row.get(key).cloned().unwrap_or_else(|| {
                        warn!(column = %key, "selected column missing from row");
                        Value::Null
                    });
                    (key.clone(), value)
                })
                .collect::<Row>()
        })
        .collect()
}

/// Whether `row` satisfies `condition`.
///
/// `=` and `<>` compare type and value exactly. The ordering operators use
/// the ordering of [`Value`], which also orders values of different types;
/// NaN and missing columns compare false. A column missing from the row only
/// equals another missing column.
pub fn evaluate(condition: &Condition, row: &Row) -> bool {
    let left = resolve(&condition.left, row);
    let right = resolve(&condition.right, row);

    match condition.operator {
        CompareOp::Equal => left == right,
        CompareOp::NotEqual => left != right,
        op => order(left, right).is_some_and(|ord| op.holds_for(ord)),
    }
}

fn order(left: Option<&Value>, right: Option<&Value>) -> Option<Ordering> {
    let (left, right) = (left?, right?);
    if !left.same_type(right) {
        debug!(
            left = left.type_name(),
            right = right.type_name(),
            "ordering values of different types"
        );
    }
    left.partial_cmp(right)
}

fn resolve<'a>(operand: &'a Operand, row: &'a Row) -> Option<&'a Value> {
    match operand {
        Operand::Field(field) => row.get(&field.key()),
        Operand::Literal(value) => Some(value),
    }
}

fn describe(operand: &Operand) -> String {
    match operand {
        Operand::Field(field) => field.key(),
        Operand::Literal(Value::String(s)) => format!("{:?}", s),
        Operand::Literal(value) => value.to_string(),
    }
}
