//! WHERE / AND / OR expansion of filter maps.

use std::borrow::Cow;

use super::columns::column;
use super::operators::OperatorTable;
use crate::error::{FragError, FragResult};
use crate::fragment::{Query, join, literal};
use crate::sql;
use crate::value::{Map, Value, defined_entries};

/// Options for [`where_with`].
///
/// # Example
/// ```ignore
/// use pgfrag::{WhereOptions, where_with};
///
/// let opts = WhereOptions::new().keyword("HAVING").delimiter("OR");
/// let q = where_with(None, &filter, &opts)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereOptions {
    keyword: Cow<'static, str>,
    delimiter: Cow<'static, str>,
    operators: OperatorTable,
}

impl Default for WhereOptions {
    fn default() -> Self {
        Self {
            keyword: Cow::Borrowed("WHERE"),
            delimiter: Cow::Borrowed("AND"),
            operators: OperatorTable::default(),
        }
    }
}

impl WhereOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyword that opens the clause (`WHERE`, `AND`, `HAVING`, ...).
    pub fn keyword(mut self, keyword: impl Into<Cow<'static, str>>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Boolean operator placed between comparisons.
    pub fn delimiter(mut self, delimiter: impl Into<Cow<'static, str>>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn operators(mut self, operators: OperatorTable) -> Self {
        self.operators = operators;
        self
    }

    pub fn get_keyword(&self) -> &str {
        &self.keyword
    }

    pub fn get_delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn get_operators(&self) -> &OperatorTable {
        &self.operators
    }
}

/// One `identifier operator value` record produced by the filter walk.
#[derive(Debug)]
struct Comparison<'v> {
    path: String,
    operator: &'v str,
    value: &'v Value,
}

impl Comparison<'_> {
    fn into_query(self, table: Option<&str>) -> Query {
        let target = column(table, &self.path);
        if self.value.is_nullish() {
            let operator = match self.operator {
                "=" => "IS",
                "!=" => "IS NOT",
                other => other,
            };
            return sql!({target} " " {literal(operator)} " NULL");
        }
        sql!({target} " " {literal(self.operator)} " " {self.value})
    }
}

struct Walker<'v> {
    operators: &'v OperatorTable,
    out: Vec<Comparison<'v>>,
}

impl<'v> Walker<'v> {
    fn field(&mut self, path: &mut Vec<&'v str>, value: &'v Value) {
        let Value::Map(map) = value else {
            self.push(path, "=", value);
            return;
        };

        let operators = self.operators;
        for (key, nested) in defined_entries(map) {
            if let Some(operator) = operators.get(key) {
                self.push(path, operator, nested);
            } else {
                path.push(key);
                self.field(path, nested);
                path.pop();
            }
        }
    }

    fn push(&mut self, path: &[&str], operator: &'v str, value: &'v Value) {
        self.out.push(Comparison {
            path: path.join("->"),
            operator,
            value,
        });
    }
}

fn comparisons<'v>(filter: &'v Map, operators: &'v OperatorTable) -> Vec<Comparison<'v>> {
    let mut walker = Walker {
        operators,
        out: Vec::new(),
    };
    let mut path = Vec::new();
    for (field, value) in defined_entries(filter) {
        path.push(field);
        walker.field(&mut path, value);
        path.pop();
    }
    walker.out
}

/// Errors name the configured keyword as the helper.
fn expand(table: Option<&str>, filter: &Value, options: &WhereOptions) -> FragResult<Query> {
    let map = match filter {
        Value::Undefined | Value::Null => return Ok(Query::empty()),
        Value::Map(map) => map,
        other => {
            return Err(FragError::invalid_input(
                options.keyword.clone(),
                "an object",
                other,
            ));
        }
    };

    let clauses: Vec<Query> = comparisons(map, &options.operators)
        .into_iter()
        .map(|c| c.into_query(table))
        .collect();
    if clauses.is_empty() {
        return Ok(Query::empty());
    }

    let delimiter = format!(" {} ", options.delimiter);
    Ok(sql!({literal(options.keyword.as_ref())} " " {join(clauses, delimiter)}))
}

/// Expand a filter map into `WHERE ... AND ...`.
///
/// Top-level keys are columns (qualified with `table` when given). Nested
/// maps either pick an operator (`{"age": {"gt": 21}}`) or descend into a
/// JSON path (`{"data": {"foo": 1}}` compares `"data->foo"`). `Null` values
/// compare with `IS NULL` / `IS NOT NULL`.
pub fn where_clause<'a>(table: impl Into<Option<&'a str>>, filter: &Value) -> FragResult<Query> {
    expand(table.into(), filter, &WhereOptions::default())
}

/// Like [`where_clause`] but opened with `AND`, for appending to an existing
/// condition.
pub fn and<'a>(table: impl Into<Option<&'a str>>, filter: &Value) -> FragResult<Query> {
    let options = WhereOptions::default().keyword("AND");
    expand(table.into(), filter, &options)
}

/// Opened with `OR`; comparisons inside are still joined with `AND`.
pub fn or<'a>(table: impl Into<Option<&'a str>>, filter: &Value) -> FragResult<Query> {
    let options = WhereOptions::default().keyword("OR");
    expand(table.into(), filter, &options)
}

/// Filter expansion with explicit keyword, delimiter and operator table.
pub fn where_with<'a>(
    table: impl Into<Option<&'a str>>,
    filter: &Value,
    options: &WhereOptions,
) -> FragResult<Query> {
    expand(table.into(), filter, options)
}
