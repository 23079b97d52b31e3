//! # pgfrag
//!
//! Composable, injection-safe PostgreSQL query fragments.
//!
//! ## Features
//!
//! - **Fragments, not strings**: every helper returns a [`Query`] that can be spliced into another one
//! - **Positional placeholders**: values are bound as `$1, $2, ...` and renumbered on every splice
//! - **Data-driven clauses**: `WHERE`, `INSERT`, `UPDATE`, upserts and column lists from plain maps
//! - **Deterministic output**: map keys are visited in sorted order
//! - **Driver hand-off**: `Query::params_ref()` plugs straight into tokio-postgres (feature `postgres`)
//!
//! ## Example
//!
//! ```ignore
//! use pgfrag::prelude::*;
//! use serde_json::json;
//!
//! let filter = Value::from(json!({ "status": "active", "age": { "gte": 18 } }));
//! let q = sql!(
//!     "SELECT * FROM users " {where_clause("users", &filter)?}
//!     " " {order_by("users", &["-created_at"])?} " " {limit(10)?}
//! );
//!
//! assert_eq!(
//!     q.text(),
//!     r#"SELECT * FROM users WHERE "users"."age" >= $1 AND "users"."status" = $2 ORDER BY "users"."created_at" DESC NULLS LAST LIMIT $3"#
//! );
//! ```

pub mod clause;
pub mod error;
pub mod fragment;
pub mod ident;
pub mod keywords;
pub mod prelude;
pub mod value;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use clause::{
    OperatorTable, PagingOptions, WhereOptions, and, column, columns, composite, composites,
    insert, keys, limit, limit_with, offset, offset_with, or, order_by, row, select, sort, update,
    upsert, values, where_clause, where_with,
};
pub use error::{FragError, FragResult};
pub use fragment::{Arg, Join, Query, Template, Token, compile, join, literal};
pub use ident::{IdentStyle, escape_ident, ident, ident_with, is_plain_identifier, quote_ident};
pub use value::{Map, Value};
