//! Query fragments.
//!
//! A [`Query`] keeps its SQL as a token stream (literal text and unresolved
//! placeholders) next to its bound values, so it can be spliced into a larger
//! fragment and renumbered there. The rendered `text` with `$1, $2, ...` is
//! computed once, when the fragment is built.
//!
//! A [`Join`] is an instruction to splice several fragments with a delimiter
//! between consecutive ones.
//!
//! # Example
//!
//! ```ignore
//! use pgfrag::{join, literal, sql};
//!
//! let names = join([sql!({ "alice" }), sql!({ "bob" })], ", ");
//! let q = sql!("SELECT * FROM users WHERE name IN (" { names } ")");
//!
//! assert_eq!(q.text(), "SELECT * FROM users WHERE name IN ($1, $2)");
//! ```

mod template;


use std::borrow::Cow;
use std::fmt::{self, Write as _};

use crate::value::Value;

pub use template::{Arg, Template, compile};

/// One element of a fragment's token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// SQL text copied verbatim.
    Literal(String),
    /// An unnumbered bound-parameter marker.
    Placeholder,
}

/// An immutable SQL fragment: rendered text, token stream and bound values.
///
/// The number of [`Token::Placeholder`]s always equals `values().len()`.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Query {
    text: String,
    tokens: Vec<Token>,
    values: Vec<Value>,
    name: Option<String>,
}

impl Query {
    /// An empty fragment; splicing it changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An unescaped literal fragment.
    ///
    /// CAUTION: the text is not escaped. Never pass user input here.
    pub fn literal(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        if sql.is_empty() {
            return Self::empty();
        }
        Self {
            text: sql.clone(),
            tokens: vec![Token::Literal(sql)],
            values: Vec::new(),
            name: None,
        }
    }

    /// Build a fragment from a token stream, numbering its placeholders.
    pub(crate) fn from_tokens(tokens: Vec<Token>, values: Vec<Value>) -> Self {
        debug_assert_eq!(
            tokens.iter().filter(|t| matches!(t, Token::Placeholder)).count(),
            values.len(),
            "placeholder count must match bound values"
        );
        let text = render(&tokens);
        Self {
            text,
            tokens,
            values,
            name: None,
        }
    }

    /// Rendered SQL with `$1, $2, ...` placeholders.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token stream used when this fragment is spliced elsewhere.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Prepared statement name, if one was attached with [`Query::named`].
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Attach a prepared statement name.
    ///
    /// The name belongs to this fragment only; it is not carried along when the
    /// fragment is spliced into another one.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the fragment contributes no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn placeholder_count(&self) -> usize {
        self.values.len()
    }

    /// Split into the `(text, values)` pair a driver expects.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.values)
    }

    pub(crate) fn into_tokens(self) -> (Vec<Token>, Vec<Value>) {
        (self.tokens, self.values)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Concatenate literal tokens and number placeholders from `$1`.
fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut idx = 0usize;
    for token in tokens {
        match token {
            Token::Literal(s) => out.push_str(s),
            Token::Placeholder => {
                idx += 1;
                // writing into a String cannot fail
                let _ = write!(out, "${idx}");
            }
        }
    }
    out
}

/// Fragments to be spliced with a delimiter between consecutive ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    clauses: Vec<Query>,
    delimiter: Cow<'static, str>,
}

impl Join {
    pub fn new<I>(clauses: I, delimiter: impl Into<Cow<'static, str>>) -> Self
    where
        I: IntoIterator<Item = Query>,
    {
        Self {
            clauses: clauses.into_iter().collect(),
            delimiter: delimiter.into(),
        }
    }

    /// A join of exactly one fragment.
    pub fn single(clause: Query) -> Self {
        Self {
            clauses: vec![clause],
            delimiter: Cow::Borrowed(","),
        }
    }

    pub fn clauses(&self) -> &[Query] {
        &self.clauses
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Whether splicing this join contributes nothing.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Resolve the join into a standalone fragment.
    pub fn into_query(self) -> Query {
        let mut template = Template::new();
        template.push_arg(self);
        template.compile()
    }
}

impl Default for Join {
    fn default() -> Self {
        Self::new(Vec::new(), ",")
    }
}

/// Create a [`Join`] of `clauses` separated by `delimiter`.
pub fn join<I>(clauses: I, delimiter: impl Into<Cow<'static, str>>) -> Join
where
    I: IntoIterator<Item = Query>,
{
    Join::new(clauses, delimiter)
}

/// Create an unescaped literal fragment. See [`Query::literal`].
pub fn literal(sql: impl Into<String>) -> Query {
    Query::literal(sql)
}
