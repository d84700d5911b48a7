use serde::{Serialize, Serializer};

use crate::ast::{Condition, FieldRef};

/// Complete query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// The SELECT ... FROM clause
    pub select: Select,

    /// JOIN clauses in source order, empty when there are none
    pub join: Vec<Join>,

    /// Optional WHERE condition
    #[serde(rename = "where")]
    pub where_clause: Option<Condition>,
}

/// `SELECT fields FROM table`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Select {
    pub fields: FieldList,
    pub from: String,
}

/// The requested columns of a SELECT clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldList {
    /// `*`
    Wildcard,

    /// Explicit columns in the requested output order
    Fields(Vec<FieldRef>),
}

impl Serialize for FieldList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldList::Wildcard => serializer.serialize_str("*"),
            FieldList::Fields(fields) => fields.serialize(serializer),
        }
    }
}

/// `JOIN table ON a.x = b.y`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Join {
    pub table: String,

    /// Both sides of the ON equality, as written
    pub fields: (FieldRef, FieldRef),
}
