//! Convenient imports for typical `pgfrag` usage.
//!
//! ```ignore
//! use pgfrag::prelude::*;
//! ```

pub use crate::{FragError, FragResult, Query, Value, ident, join, literal, sql};

pub use crate::{
    and, columns, insert, limit, offset, or, order_by, select, update, upsert, values,
    where_clause,
};
