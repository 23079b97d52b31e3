//! Value tuples: `composite`, `composites`, `row`, `values`.

use crate::error::{FragError, FragResult};
use crate::fragment::{Join, Query, join};
use crate::sql;
use crate::value::{Map, Value, defined_entries};

/// The rows described by `value`: a single map or a non-empty list of maps.
pub(crate) fn rows<'v>(helper: &'static str, value: &'v Value) -> FragResult<Vec<&'v Map>> {
    let invalid = || FragError::invalid_input(helper, "an object or an array of objects", value);
    match value {
        Value::Map(map) => Ok(vec![map]),
        Value::List(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.as_map().ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

/// One `($1, $2)` tuple per row, comma-joined.
///
/// Every row must define the same columns as the first one.
pub(crate) fn tuples(helper: &'static str, rows: &[&Map]) -> FragResult<Join> {
    let Some(first) = rows.first() else {
        return Ok(Join::default());
    };
    let expected: Vec<&str> = defined_entries(first).map(|(k, _)| k).collect();

    let mut out = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let received: Vec<&str> = defined_entries(row).map(|(k, _)| k).collect();
        if received != expected {
            return Err(FragError::mismatched_columns(
                helper, index, &expected, &received,
            ));
        }
        out.push(tuple(row));
    }
    Ok(join(out, ", "))
}

fn tuple(row: &Map) -> Query {
    let items = defined_entries(row).map(|(_, v)| sql!({v}));
    sql!("(" {join(items, ", ")} ")")
}

/// `($1, $2)` for the defined values of one map, in key order.
pub fn composite(value: &Value) -> FragResult<Query> {
    match value {
        Value::Map(map) => Ok(tuple(map)),
        other => Err(FragError::invalid_input("COMPOSITE", "an object", other)),
    }
}

/// `($1, $2), ($3, $4)` for a map or a list of maps.
pub fn composites(value: &Value) -> FragResult<Query> {
    let rows = rows("COMPOSITES", value)?;
    Ok(tuples("COMPOSITES", &rows)?.into_query())
}

/// `ROW ($1, $2)`.
pub fn row(value: &Value) -> FragResult<Query> {
    match value {
        Value::Map(map) => Ok(sql!("ROW " {tuple(map)})),
        other => Err(FragError::invalid_input("ROW", "an object", other)),
    }
}

/// `VALUES ($1, $2), ($3, $4)`.
pub fn values(value: &Value) -> FragResult<Query> {
    let rows = rows("VALUES", value)?;
    let tuples = tuples("VALUES", &rows)?;
    Ok(sql!("VALUES " {tuples}))
}
