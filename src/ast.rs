//! # Quill SQL - Abstract Syntax Tree
//!
//! The AST produced by [`crate::parser::Parser`] and consumed by
//! [`crate::executor::Engine`].
//!
//! ## Layout
//!
//! - **[query]** - the complete query and its SELECT and JOIN clauses
//! - **[expressions]** - column references, operands and the WHERE condition
//! - **[operators]** - comparison operators
//!
//! ## The Dialect
//!
//! ```text
//! SELECT movie.name, actor.name
//! FROM movie
//! JOIN actor_to_movie ON actor_to_movie.movieID = movie.id
//! JOIN actor ON actor_to_movie.actorID = actor.id
//! WHERE actor.name <> 'Daniel Craig'
//! ```
//!
//! Columns are always written qualified (`table.column`). A query has exactly
//! one SELECT clause, any number of JOIN clauses and at most one WHERE clause
//! holding a single comparison.
//!
//! An AST is built once per query and never mutated afterwards.
pub mod expressions;
pub mod operators;
pub mod query;

pub use expressions::{Condition, FieldRef, Operand};
pub use operators::CompareOp;
pub use query::{FieldList, Join, Query, Select};
