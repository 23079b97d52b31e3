//! Template flattening: literal segments and interpolations into a [`Query`].

use std::fmt;

use super::{Join, Query, Token};
use crate::error::{FragError, FragResult};
use crate::value::{Map, Value};

/// An interpolation inside a template.
///
/// The variant decides how the interpolation is spliced:
/// - `Value(Undefined)` is dropped;
/// - any other `Value` becomes one placeholder and one bound value (lists and
///   maps included, they are bound as a single parameter);
/// - `Query` is spliced as a one-element [`Join`];
/// - `Join` splices each clause with the delimiter between them;
/// - `Deferred` is called once and its result spliced by the same rules.
pub enum Arg {
    Value(Value),
    Query(Query),
    Join(Join),
    Deferred(Box<dyn FnOnce() -> Arg>),
}

impl Arg {
    /// Defer building an interpolation until the template is flattened.
    pub fn deferred<F, R>(f: F) -> Self
    where
        F: FnOnce() -> R + 'static,
        R: Into<Arg>,
    {
        Arg::Deferred(Box::new(move || f().into()))
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::Query(q) => f.debug_tuple("Query").field(q).finish(),
            Arg::Join(j) => f.debug_tuple("Join").field(j).finish(),
            Arg::Deferred(_) => f.write_str("Deferred(<fn>)"),
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<Query> for Arg {
    fn from(q: Query) -> Self {
        Arg::Query(q)
    }
}

impl From<&Query> for Arg {
    fn from(q: &Query) -> Self {
        Arg::Query(q.clone())
    }
}

impl From<Option<Query>> for Arg {
    fn from(q: Option<Query>) -> Self {
        q.map_or(Arg::Value(Value::Undefined), Arg::Query)
    }
}

impl From<Join> for Arg {
    fn from(j: Join) -> Self {
        Arg::Join(j)
    }
}

impl From<&Join> for Arg {
    fn from(j: &Join) -> Self {
        Arg::Join(j.clone())
    }
}

macro_rules! impl_arg_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_arg_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    &String,
    Map,
    serde_json::Value,
);

impl From<&Value> for Arg {
    fn from(v: &Value) -> Self {
        Arg::Value(v.clone())
    }
}

/// An in-progress template: literal segments and interpolations in order.
///
/// Usually driven by the [`sql!`](crate::sql) macro.
#[derive(Debug, Default)]
pub struct Template {
    tokens: Vec<Token>,
    values: Vec<Value>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal segment. Empty segments are skipped.
    pub fn push_str(&mut self, segment: &str) -> &mut Self {
        if !segment.is_empty() {
            self.tokens.push(Token::Literal(segment.to_string()));
        }
        self
    }

    /// Append an interpolation.
    pub fn push_arg(&mut self, arg: impl Into<Arg>) -> &mut Self {
        let mut arg = arg.into();
        loop {
            match arg {
                Arg::Deferred(f) => arg = f(),
                Arg::Value(Value::Undefined) => break,
                Arg::Value(v) => {
                    self.tokens.push(Token::Placeholder);
                    self.values.push(v);
                    break;
                }
                Arg::Query(q) => {
                    self.splice(Join::single(q));
                    break;
                }
                Arg::Join(j) => {
                    self.splice(j);
                    break;
                }
            }
        }
        self
    }

    fn splice(&mut self, join: Join) {
        let Join { clauses, delimiter } = join;
        for (i, clause) in clauses.into_iter().enumerate() {
            if i != 0 && !delimiter.is_empty() {
                self.tokens.push(Token::Literal(delimiter.to_string()));
            }
            let (tokens, values) = clause.into_tokens();
            self.tokens.extend(tokens);
            self.values.extend(values);
        }
    }

    /// Number placeholders and produce the final fragment.
    pub fn compile(self) -> Query {
        let query = Query::from_tokens(self.tokens, self.values);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "pgfrag",
            placeholders = query.placeholder_count(),
            text_len = query.text().len(),
            "compiled fragment"
        );
        query
    }
}

/// Compile the classic tagged-template shape: `n + 1` literal segments around
/// `n` interpolations.
pub fn compile(segments: &[&str], args: Vec<Arg>) -> FragResult<Query> {
    if segments.len() != args.len() + 1 {
        return Err(FragError::TemplateShape {
            segments: segments.len(),
            args: args.len(),
        });
    }

    let mut template = Template::new();
    let mut args = args.into_iter();
    for segment in segments {
        template.push_str(segment);
        if let Some(arg) = args.next() {
            template.push_arg(arg);
        }
    }
    Ok(template.compile())
}

/// Build a [`Query`] from string literals and `{expr}` interpolations.
///
/// String literals are copied verbatim; each `{expr}` is converted with
/// `Into<Arg>` and spliced (values become placeholders, fragments are inlined).
///
/// ```ignore
/// use pgfrag::{sql, where_clause};
///
/// let q = sql!("SELECT * FROM users " {where_clause(None, &filter)?} " LIMIT " {10});
/// ```
#[macro_export]
macro_rules! sql {
    ($($body:tt)*) => {{
        let mut template = $crate::Template::new();
        $crate::__sql_segments!(template; $($body)*);
        template.compile()
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sql_segments {
    ($template:ident;) => {};
    ($template:ident; $segment:literal $($rest:tt)*) => {
        $template.push_str($segment);
        $crate::__sql_segments!($template; $($rest)*);
    };
    ($template:ident; { $arg:expr } $($rest:tt)*) => {
        $template.push_arg($arg);
        $crate::__sql_segments!($template; $($rest)*);
    };
}
