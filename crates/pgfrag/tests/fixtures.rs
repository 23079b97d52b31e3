//! Helper outputs spliced into surrounding statements.

use pgfrag::*;
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn check(q: Query, text: &str, values: Vec<Value>) {
    assert_eq!(q.text(), text);
    assert_eq!(q.values(), values.as_slice());
}

#[test]
fn and_with_table() -> FragResult<()> {
    let q = sql!("SELECT * FROM users WHERE id = 1 " {and("users", &v(json!({ "name": "john" })))?});
    check(
        q,
        r#"SELECT * FROM users WHERE id = 1 AND "users"."name" = $1"#,
        vec!["john".into()],
    );
    Ok(())
}

#[test]
fn or_with_table() -> FragResult<()> {
    let q = sql!("SELECT * FROM users WHERE id = 1 " {or("users", &v(json!({ "name": "john" })))?});
    check(
        q,
        r#"SELECT * FROM users WHERE id = 1 OR "users"."name" = $1"#,
        vec!["john".into()],
    );
    Ok(())
}

#[test]
fn where_ne() -> FragResult<()> {
    let q = sql!("SELECT * FROM users " {where_clause(None, &v(json!({ "name": { "ne": "john" } })))?});
    check(q, r#"SELECT * FROM users WHERE "name" != $1"#, vec!["john".into()]);
    Ok(())
}

#[test]
fn where_like() -> FragResult<()> {
    let q = sql!("SELECT * FROM users " {where_clause(None, &v(json!({ "name": { "like": "j%" } })))?});
    check(q, r#"SELECT * FROM users WHERE "name" LIKE $1"#, vec!["j%".into()]);
    Ok(())
}

#[test]
fn where_multiple_with_table() -> FragResult<()> {
    let filter = v(json!({ "name": "john", "age": { "gte": 42, "lt": 60 } }));
    let q = sql!("SELECT * FROM users " {where_clause("users", &filter)?});
    check(
        q,
        r#"SELECT * FROM users WHERE "users"."age" >= $1 AND "users"."age" < $2 AND "users"."name" = $3"#,
        vec![42.into(), 60.into(), "john".into()],
    );
    Ok(())
}

#[test]
fn where_undefined_is_a_no_op() -> FragResult<()> {
    let q = sql!("SELECT * FROM users " {where_clause(None, &Value::map([("name", Value::Undefined)]))?});
    check(q, "SELECT * FROM users ", vec![]);
    Ok(())
}

#[test]
fn order_by_none() -> FragResult<()> {
    let fields: Vec<String> = Vec::new();
    let q = sql!("SELECT * FROM users " {order_by(None, fields.as_slice())?});
    check(q, "SELECT * FROM users ", vec![]);
    Ok(())
}

#[test]
fn order_by_with_table() -> FragResult<()> {
    let q = sql!("SELECT * FROM users " {order_by("users", &["name", "-age"])?});
    check(
        q,
        r#"SELECT * FROM users ORDER BY "users"."name" ASC NULLS LAST, "users"."age" DESC NULLS LAST"#,
        vec![],
    );
    Ok(())
}

#[test]
fn sort_fixtures() -> FragResult<()> {
    check(sort(None, "name")?, r#""name" ASC NULLS LAST"#, vec![]);
    check(sort("users", "-name")?, r#""users"."name" DESC NULLS LAST"#, vec![]);
    Ok(())
}

#[test]
fn select_fixtures() -> FragResult<()> {
    let obj = v(json!({ "name": "jimmy", "age": 42 }));
    let objs = v(json!([{ "name": "jimmy", "age": 42 }, { "name": "mary", "age": 41 }]));
    let strings = v(json!(["name", "age"]));

    check(
        sql!({select(None, &obj)?} " FROM users"),
        r#"SELECT "age", "name" FROM users"#,
        vec![],
    );
    check(
        sql!({select("users", &objs)?} " FROM users"),
        r#"SELECT "users"."age", "users"."name" FROM users"#,
        vec![],
    );
    check(
        sql!({select("users", &strings)?} " FROM users"),
        r#"SELECT "users"."name", "users"."age" FROM users"#,
        vec![],
    );
    Ok(())
}

#[test]
fn keys_with_reserved_word() -> FragResult<()> {
    let q = sql!("SELECT " {keys(None, &v(json!({ "id": true, "user": true })))?} " FROM users");
    check(q, r#"SELECT "id", "user" FROM users"#, vec![]);
    Ok(())
}

#[test]
fn composites_multiple() -> FragResult<()> {
    let rows = v(json!([{ "name": "jimmy", "age": 42 }, { "name": "mary", "age": 41 }]));
    check(
        composites(&rows)?,
        "($1, $2), ($3, $4)",
        vec![42.into(), "jimmy".into(), 41.into(), "mary".into()],
    );
    Ok(())
}

#[test]
fn insert_many() -> FragResult<()> {
    let rows = v(json!([{ "name": "alice", "age": 42 }, { "name": "ben", "age": 31 }]));
    check(
        insert("users", &rows)?,
        r#"INSERT INTO "users" ("age", "name") VALUES ($1, $2), ($3, $4)"#,
        vec![42.into(), "alice".into(), 31.into(), "ben".into()],
    );
    Ok(())
}

#[test]
fn insert_reserved_table() -> FragResult<()> {
    check(
        insert("user", &v(json!({ "name": "abe", "age": 42 })))?,
        r#"INSERT INTO "user" ("age", "name") VALUES ($1, $2)"#,
        vec![42.into(), "abe".into()],
    );
    Ok(())
}

#[test]
fn update_with_where() -> FragResult<()> {
    let q = sql!(
        {update("users", &v(json!({ "name": "jimmy", "age": 42 })))?}
        " " {where_clause(None, &v(json!({ "id": 1 })))?}
    );
    check(
        q,
        r#"UPDATE "users" SET ("age", "name") = ROW ($1, $2) WHERE "id" = $3"#,
        vec![42.into(), "jimmy".into(), 1.into()],
    );
    Ok(())
}

#[test]
fn hand_written_upsert_with_update_no_table() -> FragResult<()> {
    let q = sql!(
        {insert("users", &v(json!({ "id": 1, "name": "jimmy" })))?}
        " ON CONFLICT (id) DO " {update(None, &v(json!({ "name": "jimmy" })))?}
    );
    check(
        q,
        r#"INSERT INTO "users" ("id", "name") VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET ("name") = ($3)"#,
        vec![1.into(), "jimmy".into(), "jimmy".into()],
    );
    Ok(())
}

#[test]
fn upsert_fixture() -> FragResult<()> {
    check(
        upsert("users", &["name"], &v(json!({ "name": "abe", "age": 42 })))?,
        r#"INSERT INTO "users" ("age", "name") VALUES ($1, $2) ON CONFLICT ("name") DO UPDATE SET ("age") = ("excluded"."age") WHERE ("users"."age") IS DISTINCT FROM ("excluded"."age")"#,
        vec![42.into(), "abe".into()],
    );
    Ok(())
}

#[test]
fn paging_fixtures() -> FragResult<()> {
    check(
        sql!("SELECT * FROM users " {limit(f64::INFINITY)?}),
        "SELECT * FROM users LIMIT ALL",
        vec![],
    );
    check(
        sql!("SELECT * FROM users " {limit(Value::Null)?}),
        "SELECT * FROM users ",
        vec![],
    );
    check(
        sql!("SELECT * FROM users " {limit(10)?} " " {offset_with(10, &PagingOptions::new().max(5))?}),
        "SELECT * FROM users LIMIT $1 OFFSET $2",
        vec![10.into(), 5.into()],
    );
    check(offset(0)?, "OFFSET $1", vec![0.into()]);
    check(offset(Value::Null)?, "", vec![]);
    Ok(())
}

#[test]
fn row_fixture() -> FragResult<()> {
    check(
        row(&v(json!({ "name": "jimmy", "age": 42 })))?,
        "ROW ($1, $2)",
        vec![42.into(), "jimmy".into()],
    );
    Ok(())
}

#[test]
fn literal_and_ident_fixtures() {
    let q = sql!("SELECT " {ident("users.name")} " FROM " {ident("user")} " " {literal("LIMIT 1")});
    check(q, r#"SELECT users.name FROM "user" LIMIT 1"#, vec![]);
}
