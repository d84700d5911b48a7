pub mod ast;
pub mod combinator;
pub mod executor;
pub mod parser;
pub mod store;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{CompareOp, Condition, FieldList, FieldRef, Join, Operand, Query, Select};
pub use combinator::{Match, Pattern};
pub use executor::{Engine, ExecError};
pub use parser::{ParseError, Parser, QueryParser};
pub use store::{Database, StoreError, TableStore};
pub use value::{Row, Table, Value, qualified_key};
