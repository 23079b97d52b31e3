//! Write statements: `insert`, `update`, `upsert`.

use super::columns::{column, column_list};
use super::values::{rows, tuples};
use crate::error::{FragError, FragResult};
use crate::fragment::{Query, Template, join};
use crate::sql;
use crate::value::{Value, defined_entries};

fn table_name<'a>(helper: &'static str, table: &'a str) -> FragResult<&'a str> {
    if table.is_empty() {
        return Err(FragError::invalid_input(helper, "a table name", "\"\""));
    }
    Ok(table)
}

fn insert_into(helper: &'static str, table: &str, value: &Value) -> FragResult<(Query, Vec<String>)> {
    let table = table_name(helper, table)?;
    let rows = rows(helper, value)?;
    let tuples = tuples(helper, &rows)?;
    let names: Vec<String> = rows
        .first()
        .map(|row| defined_entries(row).map(|(k, _)| k.to_string()).collect())
        .unwrap_or_default();
    if names.is_empty() {
        return Err(FragError::invalid_input(
            helper,
            "rows with at least one defined column",
            value,
        ));
    }

    let cols: Vec<&str> = names.iter().map(String::as_str).collect();
    let query = sql!(
        "INSERT INTO " {column(None, table)}
        " (" {column_list(None, &cols)} ") VALUES " {tuples}
    );
    Ok((query, names))
}

/// `INSERT INTO "t" ("a", "b") VALUES ($1, $2), ($3, $4)`.
///
/// Accepts a map or a list of maps; every row must define the same columns.
pub fn insert(table: &str, value: &Value) -> FragResult<Query> {
    insert_into("INSERT", table, value).map(|(query, _)| query)
}

/// `UPDATE "t" SET ("a", "b") = ROW ($1, $2)`.
///
/// A single column renders `SET ("a") = ($1)`. Without a table the statement
/// reads `UPDATE SET ...`, the form used after `ON CONFLICT DO`.
pub fn update<'a>(table: impl Into<Option<&'a str>>, value: &Value) -> FragResult<Query> {
    let Value::Map(map) = value else {
        return Err(FragError::invalid_input("UPDATE", "an object", value));
    };
    let (names, items): (Vec<&str>, Vec<Query>) =
        defined_entries(map).map(|(k, v)| (k, sql!({v}))).unzip();
    if names.is_empty() {
        return Err(FragError::invalid_input(
            "UPDATE",
            "an object with at least one defined column",
            value,
        ));
    }

    let mut template = Template::new();
    template.push_str("UPDATE ");
    if let Some(table) = table.into().filter(|t| !t.is_empty()) {
        template.push_arg(column(None, table)).push_str(" ");
    }
    template
        .push_str("SET (")
        .push_arg(column_list(None, &names))
        .push_str(if names.len() > 1 { ") = ROW (" } else { ") = (" })
        .push_arg(join(items, ", "))
        .push_str(")");
    Ok(template.compile())
}

/// Insert rows, resolving conflicts on `target`.
///
/// Columns outside the target are overwritten from `excluded`, guarded by
/// `IS DISTINCT FROM` so unchanged rows are not rewritten. When every column
/// is part of the target the conflict is ignored with `DO NOTHING`.
pub fn upsert(table: &str, target: &[&str], value: &Value) -> FragResult<Query> {
    if target.is_empty() {
        return Err(FragError::invalid_input(
            "UPSERT",
            "a non-empty conflict target",
            "[]",
        ));
    }
    let (insert, names) = insert_into("UPSERT", table, value)?;
    let changed: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| !target.contains(name))
        .collect();

    let conflict = sql!({insert} " ON CONFLICT (" {column_list(None, target)} ")");
    if changed.is_empty() {
        return Ok(sql!({conflict} " DO NOTHING"));
    }

    let excluded = column_list(Some("excluded"), &changed);
    Ok(sql!(
        {conflict} " DO UPDATE SET (" {column_list(None, &changed)} ") = (" {&excluded}
        ") WHERE (" {column_list(Some(table), &changed)} ") IS DISTINCT FROM (" {&excluded} ")"
    ))
}
