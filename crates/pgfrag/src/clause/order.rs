//! `ORDER BY` with `NULLS LAST` on every entry.

use super::columns::column;
use crate::error::{FragError, FragResult};
use crate::fragment::{Query, join, literal};
use crate::sql;

fn entry(helper: &'static str, table: Option<&str>, field: &str) -> FragResult<Query> {
    let (name, direction) = match field.strip_prefix('-') {
        Some(name) => (name, " DESC NULLS LAST"),
        None => (field, " ASC NULLS LAST"),
    };
    if name.is_empty() {
        return Err(FragError::invalid_input(
            helper,
            "a column name, optionally prefixed with `-`",
            format!("{field:?}"),
        ));
    }
    Ok(sql!({column(table, name)} {literal(direction)}))
}

/// A single sort entry: `"t"."a" ASC NULLS LAST`, or `DESC` when the field is
/// prefixed with `-`.
pub fn sort<'a>(table: impl Into<Option<&'a str>>, field: &str) -> FragResult<Query> {
    entry("SORT", table.into(), field)
}

/// `ORDER BY "t"."a" ASC NULLS LAST, "t"."b" DESC NULLS LAST`.
///
/// An empty field list yields an empty fragment.
pub fn order_by<'a, S>(table: impl Into<Option<&'a str>>, fields: &[S]) -> FragResult<Query>
where
    S: AsRef<str>,
{
    if fields.is_empty() {
        return Ok(Query::empty());
    }
    let table = table.into();
    let entries = fields
        .iter()
        .map(|field| entry("ORDER_BY", table, field.as_ref()))
        .collect::<FragResult<Vec<_>>>()?;
    Ok(sql!("ORDER BY " {join(entries, ", ")}))
}
