//! Clause builders layered on the template compiler.
//!
//! Every builder renders identifiers fully quoted (`"users"."name"`), binds
//! data as parameters and iterates map keys in sorted order, so the same
//! input always produces the same text and value order.

mod columns;
mod filter;
mod operators;
mod order;
mod paging;
mod values;
mod write;


pub use columns::{column, columns, keys, select};
pub use filter::{WhereOptions, and, or, where_clause, where_with};
pub use operators::OperatorTable;
pub use order::{order_by, sort};
pub use paging::{PagingOptions, limit, limit_with, offset, offset_with};
pub use values::{composite, composites, row, values};
pub use write::{insert, update, upsert};
