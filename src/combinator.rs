//! Parser combinators.
//!
//! A [`Pattern`] maps an input string and a byte position to an optional
//! [`Match`]. Patterns are plain immutable values: every combinator builds a
//! new pattern out of existing ones and matching never mutates anything, so
//! the same pattern at the same `(input, position)` always gives the same
//! answer.
//!
//! The value a pattern produces is generic. Anything implementing
//! [`Semantic`] can be carried through, which lets a grammar build its AST
//! nodes directly inside [`Pattern::then`] transforms. [`Parsed`] is the
//! minimal value type for grammars that only need text and lists.
//!
//! # Examples
//!
//! ```
//! use quill_sql::combinator::{rep, rgx, txt, Parsed, Pattern};
//!
//! let digits: Pattern<Parsed> = rgx(r"\d+").unwrap();
//! let list = rep(digits, Some(txt(",")));
//!
//! let m = list.try_match("1,456,789", 0).unwrap();
//! assert_eq!(m.end, 9);
//! assert_eq!(
//!     m.value,
//!     Parsed::List(vec![
//!         Parsed::Text("1".into()),
//!         Parsed::Text("456".into()),
//!         Parsed::Text("789".into()),
//!     ])
//! );
//! ```

use regex::Regex;

/// Values a pattern can produce.
///
/// The primitive combinators only ever create three shapes of value: the text
/// a literal or regex consumed, the list a sequence or repetition collected,
/// and the "no value" marker of an optional that did not match. Everything
/// else comes out of user transforms.
pub trait Semantic: Clone + std::fmt::Debug {
    /// Value of a literal or regex match
    fn text(matched: &str) -> Self;

    /// Value of a sequence or repetition
    fn list(items: Vec<Self>) -> Self;

    /// Value of an optional whose inner pattern failed
    fn nothing() -> Self;
}

/// The generic value type: text, lists of values, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Nothing,
    Text(String),
    List(Vec<Parsed>),
}

impl Semantic for Parsed {
    fn text(matched: &str) -> Self {
        Parsed::Text(matched.to_string())
    }

    fn list(items: Vec<Self>) -> Self {
        Parsed::List(items)
    }

    fn nothing() -> Self {
        Parsed::Nothing
    }
}

/// A successful match: the produced value and the byte offset right after
/// the consumed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<V> {
    pub value: V,
    pub end: usize,
}

/// A value transform applied by [`Pattern::then`].
///
/// Returning `None` rejects the match, which the enclosing pattern sees as an
/// ordinary failure.
pub type Transform<V> = fn(V) -> Option<V>;

/// A composable parsing rule.
///
/// The set of variants is closed; [`Pattern::try_match`] is the single
/// evaluator. Build patterns with the free functions in this module rather
/// than the variants directly.
#[derive(Debug, Clone)]
pub enum Pattern<V> {
    /// Exact text
    Literal(String),

    /// Regular expression that must match at the current position
    Regex(Regex),

    /// Never fails; yields [`Semantic::nothing`] and consumes nothing when
    /// the inner pattern fails
    Optional(Box<Pattern<V>>),

    /// Ordered choice, first success wins
    Any(Vec<Pattern<V>>),

    /// All operands in order, atomically
    Seq(Vec<Pattern<V>>),

    /// One or more elements, optionally separated
    Rep {
        element: Box<Pattern<V>>,
        separator: Option<Box<Pattern<V>>>,
    },

    /// Value transform over a successful match
    Then {
        inner: Box<Pattern<V>>,
        map: Transform<V>,
    },
}

impl<V: Semantic> Pattern<V> {
    /// Attempt to match at byte offset `position` of `input`.
    ///
    /// Returns `None` when the pattern does not match, including when
    /// `position` is past the end of the input or not on a char boundary.
    pub fn try_match(&self, input: &str, position: usize) -> Option<Match<V>> {
        let rest = input.get(position..)?;

        match self {
            Pattern::Literal(text) => rest.starts_with(text.as_str()).then(|| Match {
                value: V::text(text),
                end: position + text.len(),
            }),

            Pattern::Regex(regex) => {
                // Leftmost match, accepted only if it starts right here
                let found = regex.find(rest)?;
                (found.start() == 0).then(|| Match {
                    value: V::text(found.as_str()),
                    end: position + found.end(),
                })
            }

            Pattern::Optional(inner) => Some(inner.try_match(input, position).unwrap_or_else(|| {
                Match {
                    value: V::nothing(),
                    end: position,
                }
            })),

            Pattern::Any(choices) => choices
                .iter()
                .find_map(|choice| choice.try_match(input, position)),

            Pattern::Seq(parts) => {
                let mut values = Vec::with_capacity(parts.len());
                let mut end = position;
                for part in parts {
                    let m = part.try_match(input, end)?;
                    values.push(m.value);
                    end = m.end;
                }
                Some(Match {
                    value: V::list(values),
                    end,
                })
            }

            Pattern::Rep { element, separator } => {
                let mut values = Vec::new();
                let mut end = position;
                let mut next = element.try_match(input, end);

                // Each accepted step must move strictly forward
                while let Some(m) = next.take() {
                    if m.end <= end {
                        break;
                    }
                    values.push(m.value);
                    end = m.end;
                    next = match separator {
                        Some(sep) => sep
                            .try_match(input, end)
                            .and_then(|s| element.try_match(input, s.end)),
                        None => element.try_match(input, end),
                    };
                }

                (!values.is_empty()).then(|| Match {
                    value: V::list(values),
                    end,
                })
            }

            Pattern::Then { inner, map } => {
                let m = inner.try_match(input, position)?;
                map(m.value).map(|value| Match { value, end: m.end })
            }
        }
    }

    /// Wrap this pattern with a transform over its successful value.
    pub fn then(self, map: Transform<V>) -> Pattern<V> {
        Pattern::Then {
            inner: Box::new(self),
            map,
        }
    }
}

/// Match `text` exactly.
pub fn txt<V>(text: &str) -> Pattern<V> {
    Pattern::Literal(text.to_string())
}

/// Match the regular expression `pattern` anchored at the current position.
pub fn rgx<V>(pattern: &str) -> Result<Pattern<V>, regex::Error> {
    Regex::new(&format!("^(?:{})", pattern)).map(Pattern::Regex)
}

/// Match a prebuilt regex. It only counts as a match when the leftmost match
/// starts at the current position.
pub fn regex<V>(regex: Regex) -> Pattern<V> {
    Pattern::Regex(regex)
}

/// Make `pattern` optional.
pub fn opt<V>(pattern: Pattern<V>) -> Pattern<V> {
    Pattern::Optional(Box::new(pattern))
}

/// Ordered choice between `choices`.
///
/// There is no backtracking into a choice once it succeeded, so longer or
/// more specific alternatives must come first.
pub fn any<V>(choices: Vec<Pattern<V>>) -> Pattern<V> {
    Pattern::Any(choices)
}

/// All of `parts`, one after another.
pub fn seq<V>(parts: Vec<Pattern<V>>) -> Pattern<V> {
    Pattern::Seq(parts)
}

/// One or more `element`s. With a `separator`, elements must be separated by
/// it; separator values are dropped from the result.
pub fn rep<V>(element: Pattern<V>, separator: Option<Pattern<V>>) -> Pattern<V> {
    Pattern::Rep {
        element: Box::new(element),
        separator: separator.map(Box::new),
    }
}
