//! Operator keywords recognised inside nested filter maps.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Maps operator keywords (`gt`, `like`, ...) to SQL operators.
///
/// Inside a filter, a nested map key found in this table selects the comparison
/// operator; any other key is treated as a JSON path segment.
///
/// # Example
/// ```ignore
/// use pgfrag::OperatorTable;
///
/// let ops = OperatorTable::default().with("similar", "SIMILAR TO");
/// assert_eq!(ops.get("similar"), Some("SIMILAR TO"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    entries: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
}

const DEFAULT_OPERATORS: &[(&str, &str)] = &[
    ("eq", "="),
    ("ne", "!="),
    ("neq", "!="),
    ("gt", ">"),
    ("gte", ">="),
    ("lt", "<"),
    ("lte", "<="),
    ("like", "LIKE"),
    ("ilike", "ILIKE"),
    ("nlike", "NOT LIKE"),
    ("nilike", "NOT ILIKE"),
];

impl Default for OperatorTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_OPERATORS
                .iter()
                .map(|&(k, v)| (Cow::Borrowed(k), Cow::Borrowed(v)))
                .collect(),
        }
    }
}

impl OperatorTable {
    /// A table with no operators; every nested key becomes a path segment.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace an operator keyword.
    pub fn with(
        mut self,
        keyword: impl Into<Cow<'static, str>>,
        operator: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.entries.insert(keyword.into(), operator.into());
        self
    }

    /// Remove an operator keyword.
    pub fn without(mut self, keyword: &str) -> Self {
        self.entries.remove(keyword);
        self
    }

    /// SQL operator for `keyword`, if it is recognised.
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.entries.get(keyword).map(|op| op.as_ref())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
