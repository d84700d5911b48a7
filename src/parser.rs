//! The SQL dialect grammar.
//!
//! [`Parser`] is a fixed composition of the primitives in
//! [`crate::combinator`]. Every production is kept as its own [`Pattern`] and
//! exposed through an accessor, so callers can match a single clause without
//! going through a whole query.

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{CompareOp, Condition, FieldList, FieldRef, Join, Operand, Query, Select},
    combinator::{Pattern, Semantic, any, opt, rep, rgx, seq, txt},
    value::Value,
};

/// Errors that can occur while parsing a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input does not start with a valid SELECT clause
    #[error("Invalid query")]
    InvalidQuery,

    /// A query was recognised but text is left over after it
    #[error("Invalid query: unexpected input at position {position}: {remainder:?}")]
    TrailingInput { position: usize, remainder: String },
}

/// Anything that can turn query text into an AST.
///
/// [`crate::executor::Engine`] uses [`Parser`] unless it is given another
/// implementation.
pub trait QueryParser {
    fn parse_query(&self, text: &str) -> Result<Query, ParseError>;
}

/// Intermediate values produced while matching the grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Nothing,
    Text(String),
    List(Vec<Node>),
    Literal(Value),
    Field(FieldRef),
    Fields(FieldList),
    Equality(FieldRef, FieldRef),
    Operator(CompareOp),
    Select(Select),
    Join(Join),
    Condition(Condition),
    Query(Query),
}

impl Semantic for Node {
    fn text(matched: &str) -> Self {
        Node::Text(matched.to_string())
    }

    fn list(items: Vec<Self>) -> Self {
        Node::List(items)
    }

    fn nothing() -> Self {
        Node::Nothing
    }
}

/// The dialect grammar.
///
/// ```
/// use quill_sql::parser::Parser;
/// use quill_sql::ast::{FieldList, FieldRef};
///
/// let parser = Parser::new();
/// let query = parser.parse("SELECT movie.name FROM movie").unwrap();
///
/// assert_eq!(query.select.from, "movie");
/// assert_eq!(query.select.fields, FieldList::Fields(vec![FieldRef::new("movie", "name")]));
/// assert!(query.join.is_empty());
/// assert!(query.where_clause.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    ws: Pattern<Node>,
    string: Pattern<Node>,
    number: Pattern<Node>,
    boolean: Pattern<Node>,
    null: Pattern<Node>,
    identifier: Pattern<Node>,
    field_ref: Pattern<Node>,
    field_list: Pattern<Node>,
    field_equality: Pattern<Node>,
    operator: Pattern<Node>,
    value: Pattern<Node>,
    select_clause: Pattern<Node>,
    join_clause: Pattern<Node>,
    comparison: Pattern<Node>,
    where_clause: Pattern<Node>,
    query: Pattern<Node>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        let ws = token(r"\s+");
        let wso = opt(ws.clone());
        let dot = txt(".");
        let comma = txt(",");

        let string = token(r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#).then(to_string_literal);
        // Also matches malformed numbers, see `numeric_prefix`
        let number = token(r"[\d.\-]+").then(to_number_literal);
        let boolean = token(r"(?i)(?:true|false)\b").then(to_boolean_literal);
        let null = token(r"(?i)null\b").then(|_| Some(Node::Literal(Value::Null)));

        let identifier = token(r"\w+");

        let select_kw = token("(?i)SELECT");
        let from_kw = token("(?i)FROM");
        let join_kw = token("(?i)JOIN");
        let on_kw = token("(?i)ON");
        let where_kw = token("(?i)WHERE");

        let field_ref = seq(vec![identifier.clone(), dot, identifier.clone()]).then(to_field_ref);

        let field_list = any(vec![
            txt("*").then(|_| Some(Node::Fields(FieldList::Wildcard))),
            rep(
                field_ref.clone(),
                Some(seq(vec![wso.clone(), comma, wso.clone()])),
            )
            .then(to_field_list),
        ]);

        let field_equality = seq(vec![
            field_ref.clone(),
            wso.clone(),
            txt("="),
            wso.clone(),
            field_ref.clone(),
        ])
        .then(to_field_equality);

        // Longer operators first: alternation never backtracks
        let operator = any(vec![
            txt("<>"),
            txt("<="),
            txt(">="),
            txt("<"),
            txt(">"),
            txt("="),
        ])
        .then(to_operator);

        let value = any(vec![
            string.clone(),
            number.clone(),
            boolean.clone(),
            null.clone(),
            field_ref.clone(),
        ]);

        let select_clause = seq(vec![
            select_kw,
            ws.clone(),
            field_list.clone(),
            ws.clone(),
            from_kw,
            ws.clone(),
            identifier.clone(),
            wso.clone(),
        ])
        .then(to_select);

        let join_clause = seq(vec![
            join_kw,
            ws.clone(),
            identifier.clone(),
            ws.clone(),
            on_kw,
            ws.clone(),
            field_equality.clone(),
            wso.clone(),
        ])
        .then(to_join);

        let comparison = seq(vec![
            value.clone(),
            wso.clone(),
            operator.clone(),
            wso.clone(),
            value.clone(),
        ])
        .then(to_condition);

        let where_clause = seq(vec![where_kw, ws.clone(), comparison.clone(), wso.clone()])
            .then(|node| {
                let [_, _, condition, _] = items::<4>(node)?;
                matches!(condition, Node::Condition(_)).then_some(condition)
            });

        let query = seq(vec![
            select_clause.clone(),
            wso.clone(),
            opt(rep(join_clause.clone(), Some(wso.clone()))),
            opt(where_clause.clone()),
            wso,
        ])
        .then(to_query);

        Parser {
            ws,
            string,
            number,
            boolean,
            null,
            identifier,
            field_ref,
            field_list,
            field_equality,
            operator,
            value,
            select_clause,
            join_clause,
            comparison,
            where_clause,
            query,
        }
    }

    /// Parse a complete query.
    ///
    /// The whole input must be consumed. JOIN and WHERE clauses are optional;
    /// a missing or malformed SELECT clause is [`ParseError::InvalidQuery`].
    pub fn parse(&self, text: &str) -> Result<Query, ParseError> {
        let Some(m) = self.query.try_match(text, 0) else {
            debug!(query = text, "query does not match the grammar");
            return Err(ParseError::InvalidQuery);
        };

        if m.end < text.len() {
            debug!(query = text, position = m.end, "unparsed input after query");
            return Err(ParseError::TrailingInput {
                position: m.end,
                remainder: text[m.end..].to_string(),
            });
        }

        match m.value {
            Node::Query(query) => {
                trace!(?query, "parsed query");
                Ok(query)
            }
            _ => Err(ParseError::InvalidQuery),
        }
    }

    /// One or more whitespace characters
    pub fn ws(&self) -> &Pattern<Node> {
        &self.ws
    }

    /// Single- or double-quoted string literal
    pub fn string(&self) -> &Pattern<Node> {
        &self.string
    }

    pub fn number(&self) -> &Pattern<Node> {
        &self.number
    }

    pub fn boolean(&self) -> &Pattern<Node> {
        &self.boolean
    }

    pub fn null(&self) -> &Pattern<Node> {
        &self.null
    }

    /// Table or column name
    pub fn identifier(&self) -> &Pattern<Node> {
        &self.identifier
    }

    /// `table.column`
    pub fn field_ref(&self) -> &Pattern<Node> {
        &self.field_ref
    }

    /// `*` or a comma separated list of `table.column`
    pub fn field_list(&self) -> &Pattern<Node> {
        &self.field_list
    }

    /// `a.x = b.y`, the condition of a JOIN
    pub fn field_equality(&self) -> &Pattern<Node> {
        &self.field_equality
    }

    pub fn operator(&self) -> &Pattern<Node> {
        &self.operator
    }

    /// Literal or column reference
    pub fn value(&self) -> &Pattern<Node> {
        &self.value
    }

    pub fn select_clause(&self) -> &Pattern<Node> {
        &self.select_clause
    }

    pub fn join_clause(&self) -> &Pattern<Node> {
        &self.join_clause
    }

    /// `value operator value`
    pub fn comparison(&self) -> &Pattern<Node> {
        &self.comparison
    }

    pub fn where_clause(&self) -> &Pattern<Node> {
        &self.where_clause
    }

    /// The full query rule. Unlike [`Parser::parse`] it matches a prefix.
    pub fn query(&self) -> &Pattern<Node> {
        &self.query
    }
}

impl QueryParser for Parser {
    fn parse_query(&self, text: &str) -> Result<Query, ParseError> {
        self.parse(text)
    }
}

/// Compiles one of the grammar's built-in regexes.
fn token(pattern: &'static str) -> Pattern<Node> {
    rgx(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
}

/// Destructure the value of an `N`-part sequence.
fn items<const N: usize>(node: Node) -> Option<[Node; N]> {
    match node {
        Node::List(items) => items.try_into().ok(),
        _ => None,
    }
}

fn text(node: Node) -> Option<String> {
    match node {
        Node::Text(s) => Some(s),
        _ => None,
    }
}

fn to_string_literal(node: Node) -> Option<Node> {
    let quoted = text(node)?;
    // Both quotes are single-byte
    let inner = quoted.get(1..quoted.len() - 1)?;

    // `\x` stands for `x`, whatever `x` is
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.extend(chars.next()),
            c => value.push(c),
        }
    }
    Some(Node::Literal(Value::String(value)))
}

fn to_number_literal(node: Node) -> Option<Node> {
    numeric_prefix(&text(node)?).map(|n| Node::Literal(Value::Number(n)))
}

fn to_boolean_literal(node: Node) -> Option<Node> {
    let keyword = text(node)?;
    Some(Node::Literal(Value::Boolean(keyword.eq_ignore_ascii_case("true"))))
}

/// Reads the longest leading `-?digits[.digits]` of text matched by the
/// number rule.
///
/// The rule accepts any run of digits, dots and minus signs, so `1.2.3` reads
/// as `1.2`. Text with no digits before the first stray character (`-`, `.`,
/// `--1`) has no numeric value and the rule does not match.
pub fn numeric_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }
    text[..end].parse().ok()
}

fn to_field_ref(node: Node) -> Option<Node> {
    let [table, _, column] = items::<3>(node)?;
    Some(Node::Field(FieldRef {
        table: text(table)?,
        column: text(column)?,
    }))
}

fn to_field_list(node: Node) -> Option<Node> {
    let Node::List(nodes) = node else {
        return None;
    };
    let fields = nodes
        .into_iter()
        .map(|n| match n {
            Node::Field(field) => Some(field),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Node::Fields(FieldList::Fields(fields)))
}

fn to_field_equality(node: Node) -> Option<Node> {
    match items::<5>(node)? {
        [Node::Field(left), _, _, _, Node::Field(right)] => Some(Node::Equality(left, right)),
        _ => None,
    }
}

fn to_operator(node: Node) -> Option<Node> {
    CompareOp::from_symbol(&text(node)?).map(Node::Operator)
}

fn to_operand(node: Node) -> Option<Operand> {
    match node {
        Node::Field(field) => Some(Operand::Field(field)),
        Node::Literal(value) => Some(Operand::Literal(value)),
        _ => None,
    }
}

fn to_select(node: Node) -> Option<Node> {
    match items::<8>(node)? {
        [_, _, Node::Fields(fields), _, _, _, Node::Text(from), _] => {
            Some(Node::Select(Select { fields, from }))
        }
        _ => None,
    }
}

fn to_join(node: Node) -> Option<Node> {
    match items::<8>(node)? {
        [_, _, Node::Text(table), _, _, _, Node::Equality(left, right), _] => Some(Node::Join(Join {
            table,
            fields: (left, right),
        })),
        _ => None,
    }
}

fn to_condition(node: Node) -> Option<Node> {
    match items::<5>(node)? {
        [left, _, Node::Operator(operator), _, right] => Some(Node::Condition(Condition {
            left: to_operand(left)?,
            right: to_operand(right)?,
            operator,
        })),
        _ => None,
    }
}

fn to_query(node: Node) -> Option<Node> {
    let [select, _, joins, where_clause, _] = items::<5>(node)?;

    let Node::Select(select) = select else {
        return None;
    };

    let join = match joins {
        Node::Nothing => Vec::new(),
        Node::List(joins) => joins
            .into_iter()
            .map(|j| match j {
                Node::Join(join) => Some(join),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?,
        _ => return None,
    };

    let where_clause = match where_clause {
        Node::Nothing => None,
        Node::Condition(condition) => Some(condition),
        _ => return None,
    };

    Some(Node::Query(Query {
        select,
        join,
        where_clause,
    }))
}
