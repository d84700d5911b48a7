use serde::Serialize;

use crate::{ast::CompareOp, value::{Value, qualified_key}};

/// A qualified column reference, `table.column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRef {
    pub table: String,
    pub column: String,
}

impl FieldRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        FieldRef {
            table: table.into(),
            column: column.into(),
        }
    }

    /// The key this column has in a virtual table row
    pub fn key(&self) -> String {
        qualified_key(&self.table, &self.column)
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    /// Column reference, resolved against each row
    ///
    /// # Example
    /// ```text
    /// actor.name
    /// ```
    Field(FieldRef),

    /// String, number, boolean or null literal
    ///
    /// # Examples
    /// ```text
    /// 'Daniel Craig'
    /// -100.5
    /// TRUE
    /// null
    /// ```
    Literal(Value),
}

/// The single comparison of a WHERE clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub left: Operand,
    pub right: Operand,
    pub operator: CompareOp,
}
