//! `LIMIT` and `OFFSET`.

use crate::error::{FragError, FragResult};
use crate::fragment::{Query, literal};
use crate::sql;
use crate::value::Value;

/// Options for [`limit_with`] and [`offset_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingOptions {
    max: Option<i64>,
}

impl PagingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the requested count to at most `max`.
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn get_max(&self) -> Option<i64> {
        self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    All,
    Rows(i64),
}

const EXPECTED: &str = "a number";

// i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn count(helper: &'static str, value: &Value, options: &PagingOptions) -> FragResult<Option<Count>> {
    let requested = match value {
        Value::Undefined | Value::Null => return Ok(None),
        Value::Int(n) => Count::Rows(*n),
        Value::Float(f) if *f == f64::INFINITY => Count::All,
        Value::Float(f) if f.fract() == 0.0 && *f >= -I64_BOUND && *f < I64_BOUND => {
            Count::Rows(*f as i64)
        }
        other => return Err(FragError::invalid_input(helper, EXPECTED, other)),
    };

    Ok(Some(match (requested, options.max) {
        (Count::All, Some(max)) => Count::Rows(max),
        (Count::Rows(n), Some(max)) => Count::Rows(n.min(max)),
        (count, None) => count,
    }))
}

/// `LIMIT $1`, or `LIMIT ALL` for positive infinity. `Null` yields an empty
/// fragment.
pub fn limit(n: impl Into<Value>) -> FragResult<Query> {
    limit_with(n, &PagingOptions::default())
}

pub fn limit_with(n: impl Into<Value>, options: &PagingOptions) -> FragResult<Query> {
    Ok(match count("LIMIT", &n.into(), options)? {
        None => Query::empty(),
        Some(Count::All) => literal("LIMIT ALL"),
        Some(Count::Rows(n)) => sql!("LIMIT " {n}),
    })
}

/// `OFFSET $1`. `Null` yields an empty fragment.
pub fn offset(n: impl Into<Value>) -> FragResult<Query> {
    offset_with(n, &PagingOptions::default())
}

pub fn offset_with(n: impl Into<Value>, options: &PagingOptions) -> FragResult<Query> {
    let value = n.into();
    match count("OFFSET", &value, options)? {
        None => Ok(Query::empty()),
        Some(Count::All) => Err(FragError::invalid_input("OFFSET", "a finite number", value)),
        Some(Count::Rows(n)) => Ok(sql!("OFFSET " {n})),
    }
}
