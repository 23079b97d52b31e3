//! Column lists: `column`, `columns`, `keys`, `select`.

use crate::error::{FragError, FragResult};
use crate::fragment::{Join, Query, join};
use crate::ident::{qualify, quote_ident};
use crate::sql;
use crate::value::Value;

const COLUMN_SHAPES: &str = "an object, an array of objects or an array of strings";

/// A quoted, optionally table-qualified column identifier.
pub fn column<'a>(table: impl Into<Option<&'a str>>, name: &str) -> Query {
    Query::literal(quote_ident(&qualify(table.into(), name)))
}

/// Column names described by `value`: the defined keys of a map, of the first
/// map in a list, or the strings of a string list.
pub(crate) fn column_names<'v>(helper: &'static str, value: &'v Value) -> FragResult<Vec<&'v str>> {
    let invalid = || FragError::invalid_input(helper, COLUMN_SHAPES, value);
    match value {
        Value::Map(_) => value.defined_keys().ok_or_else(invalid),
        Value::List(items) => match items.first() {
            Some(first @ Value::Map(_)) => first.defined_keys().ok_or_else(invalid),
            Some(Value::Text(_)) => items
                .iter()
                .map(|item| item.as_str().ok_or_else(invalid))
                .collect(),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

/// Comma-joined quoted identifiers.
pub(crate) fn column_list(table: Option<&str>, names: &[&str]) -> Join {
    join(names.iter().map(|name| column(table, name)), ", ")
}

fn render(helper: &'static str, table: Option<&str>, value: &Value) -> FragResult<Query> {
    let names = column_names(helper, value)?;
    Ok(column_list(table, &names).into_query())
}

/// `"a", "b"` for the columns described by `value`.
///
/// Maps contribute their defined keys in sorted order; a list of maps uses the
/// first map; a list of strings is used as given.
pub fn columns<'a>(table: impl Into<Option<&'a str>>, value: &Value) -> FragResult<Query> {
    render("COLUMNS", table.into(), value)
}

/// Same output as [`columns`], named for the key side of an object.
pub fn keys<'a>(table: impl Into<Option<&'a str>>, value: &Value) -> FragResult<Query> {
    render("KEYS", table.into(), value)
}

/// `SELECT "a", "b"`.
pub fn select<'a>(table: impl Into<Option<&'a str>>, value: &Value) -> FragResult<Query> {
    let list = render("SELECT", table.into(), value)?;
    Ok(sql!("SELECT " {list}))
}
