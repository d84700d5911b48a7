use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A scalar cell value stored in a table row.
///
/// Tables hold flat records only, so there are no array or object variants.
/// All numbers are floating point: the dialect parses every numeric literal
/// as a float, and stored integers are widened on load.
///
/// # Ordering
///
/// The derived `PartialOrd` compares the variant first (`Null < Boolean <
/// Number < String`) and the payload second. Filters rely on it for `<`, `>`,
/// `<=` and `>=`, including across types.
///
/// # Examples
///
/// ```
/// use quill_sql::Value;
///
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let number = Value::Number(42.0);
/// let string = Value::String("hello".to_string());
///
/// assert!(number < string);
/// assert_eq!(null.type_name(), "null");
/// assert_eq!(boolean.to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    /// SQL/JSON null
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Number(f64),

    /// UTF-8 string
    String(String),
}

impl Value {
    /// Name of the variant, as logged when a comparison mixes types
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }

    /// Whether `self` and `other` are the same variant.
    pub fn same_type(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            // Whole numbers print without a trailing `.0`
            Value::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

/// Builds the qualified column key `table.column`.
///
/// Every key in a virtual table goes through here.
pub fn qualified_key(table: &str, column: &str) -> String {
    format!("{}.{}", table, column)
}

/// A single record: an insertion-ordered mapping from column key to value.
///
/// Keys are unique. Inserting an existing key replaces its value in place, so
/// the column order of a row only ever grows at the end.
///
/// ```
/// use quill_sql::{Row, Value};
///
/// let row = Row::from_pairs([("movie.id", Value::from(1)), ("movie.name", Value::from("Avatar"))]);
/// assert_eq!(row.get("movie.name"), Some(&Value::from("Avatar")));
/// assert_eq!(row.keys().collect::<Vec<_>>(), vec!["movie.id", "movie.name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut row = Row::new();
        for (key, value) in pairs {
            row.insert(key, value);
        }
        row
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.columns.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace a column, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.columns.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.columns.push((key, value));
                None
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Row::from_pairs(iter)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (key, value) in &self.columns {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// An ordered sequence of rows. Order is the iteration and output order.
pub type Table = Vec<Row>;
