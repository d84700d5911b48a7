use std::{cmp::Ordering, fmt};

use serde::Serialize;

/// Comparison operators allowed in a WHERE clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// Equal (`=`)
    #[serde(rename = "=")]
    Equal,
    /// Not equal (`<>`)
    #[serde(rename = "<>")]
    NotEqual,
    /// Less than (`<`)
    #[serde(rename = "<")]
    LessThan,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    GreaterThan,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LessEqual,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GreaterEqual,
}

impl CompareOp {
    /// Source text of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "<>",
            CompareOp::LessThan => "<",
            CompareOp::GreaterThan => ">",
            CompareOp::LessEqual => "<=",
            CompareOp::GreaterEqual => ">=",
        }
    }

    /// Whether two operands ordered as `ordering` satisfy this operator.
    pub fn holds_for(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Equal => ordering == Ordering::Equal,
            CompareOp::NotEqual => ordering != Ordering::Equal,
            CompareOp::LessThan => ordering == Ordering::Less,
            CompareOp::GreaterThan => ordering == Ordering::Greater,
            CompareOp::LessEqual => ordering != Ordering::Greater,
            CompareOp::GreaterEqual => ordering != Ordering::Less,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(CompareOp::Equal),
            "<>" => Some(CompareOp::NotEqual),
            "<" => Some(CompareOp::LessThan),
            ">" => Some(CompareOp::GreaterThan),
            "<=" => Some(CompareOp::LessEqual),
            ">=" => Some(CompareOp::GreaterEqual),
            _ => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
