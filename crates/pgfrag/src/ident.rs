//! Safe SQL identifier rendering.
//!
//! Identifiers can never be bound as parameters, so they are rendered into the
//! SQL text as literal tokens. A dotted path (`schema.table.column`) is split on
//! `.` and each segment is rendered on its own:
//!
//! - [`IdentStyle::Minimal`] leaves a segment bare when it matches
//!   `[A-Za-z_][A-Za-z0-9_]*` and is not a reserved key word, and quotes it
//!   otherwise.
//! - [`IdentStyle::Quoted`] quotes every segment.
//!
//! Quoted segments double any embedded `"`. Rendering never fails.
//!
//! # Example
//! ```ignore
//! use pgfrag::{escape_ident, IdentStyle};
//!
//! assert_eq!(escape_ident("users.name", IdentStyle::Minimal), "users.name");
//! assert_eq!(escape_ident("user.name", IdentStyle::Minimal), r#""user".name"#);
//! assert_eq!(escape_ident("users.name", IdentStyle::Quoted), r#""users"."name""#);
//! ```

use crate::fragment::Query;
use crate::keywords;

/// How identifier segments are quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentStyle {
    /// Quote only when the segment is not a plain, non-reserved name.
    #[default]
    Minimal,
    /// Quote every segment.
    Quoted,
}

/// Whether `segment` matches `^[A-Za-z_][A-Za-z0-9_]*$`.
pub fn is_plain_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Render a dotted identifier path with the given style.
pub fn escape_ident(path: &str, style: IdentStyle) -> String {
    let mut out = String::with_capacity(path.len() + 4);
    write_ident(&mut out, path, style);
    out
}

/// Render a dotted identifier path quoting every segment.
pub fn quote_ident(path: &str) -> String {
    escape_ident(path, IdentStyle::Quoted)
}

/// Append a rendered identifier path to `out`.
pub(crate) fn write_ident(out: &mut String, path: &str, style: IdentStyle) {
    for (i, segment) in path.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        write_segment(out, segment, style);
    }
}

fn write_segment(out: &mut String, segment: &str, style: IdentStyle) {
    let bare = style == IdentStyle::Minimal
        && is_plain_identifier(segment)
        && !keywords::is_reserved(segment);
    if bare {
        out.push_str(segment);
        return;
    }

    out.push('"');
    for c in segment.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

/// Create an escaped identifier fragment using [`IdentStyle::Minimal`].
///
/// An empty path produces an empty fragment.
pub fn ident(path: &str) -> Query {
    ident_with(path, IdentStyle::Minimal)
}

/// Create an escaped identifier fragment with an explicit style.
pub fn ident_with(path: &str, style: IdentStyle) -> Query {
    if path.is_empty() {
        return Query::empty();
    }
    Query::literal(escape_ident(path, style))
}

/// Join an optional table prefix and a column path with `.`.
pub(crate) fn qualify(table: Option<&str>, column: &str) -> String {
    match table {
        Some(table) if !table.is_empty() => format!("{table}.{column}"),
        _ => column.to_string(),
    }
}
