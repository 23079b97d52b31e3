//! Build a search query from a JSON filter.
//!
//! Run with: cargo run --example dynamic_filter -p pgfrag -- '{"age": {"gte": 18}, "city": "Oslo"}'

use pgfrag::prelude::*;
use pgfrag::{PagingOptions, limit_with, offset_with};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw = env::args()
        .nth(1)
        .unwrap_or_else(|| r#"{"status": "active", "age": {"gte": 18}, "deleted_at": null}"#.into());
    let filter = Value::from(serde_json::from_str::<serde_json::Value>(&raw)?);

    let paging = PagingOptions::new().max(100);
    let q = sql!(
        "SELECT id, email FROM users " {where_clause("users", &filter)?}
        " " {order_by("users", &["-created_at"])?}
        " " {limit_with(500, &paging)?} " " {offset_with(0, &paging)?}
    );

    println!("{}", q.text());
    for (i, value) in q.values().iter().enumerate() {
        println!("  ${} = {}", i + 1, value);
    }
    Ok(())
}
