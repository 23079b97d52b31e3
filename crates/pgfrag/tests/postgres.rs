#![cfg(feature = "postgres")]

use pgfrag::*;
use serde_json::json;
use tokio_postgres::{Client, NoTls};

async fn try_connect(test: &str) -> Option<Client> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping {test}");
            return None;
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .expect("connect to DATABASE_URL");
    tokio::spawn(async move {
        let _ = connection.await;
    });
    Some(client)
}

#[tokio::test]
async fn parameters_round_trip() {
    let Some(client) = try_connect("parameters_round_trip").await else {
        return;
    };

    let q = sql!(
        "SELECT " {1} "::int4 AS a, " {"abe"} "::text AS b, "
        {Value::from(json!({ "k": [1, 2] }))} "::jsonb AS c, " {2.5} "::float8 AS d"
    );
    let row = client.query_one(q.text(), &q.params_ref()).await.unwrap();

    assert_eq!(row.get::<_, i32>("a"), 1);
    assert_eq!(row.get::<_, String>("b"), "abe");
    assert_eq!(row.get::<_, serde_json::Value>("c"), json!({ "k": [1, 2] }));
    assert_eq!(row.get::<_, f64>("d"), 2.5);
}

#[tokio::test]
async fn generated_statements_execute() {
    let Some(client) = try_connect("generated_statements_execute").await else {
        return;
    };

    let table = format!("pgfrag_test_{}", std::process::id());
    client
        .batch_execute(&format!(
            "CREATE TEMP TABLE {table} (id int4 PRIMARY KEY, name text NOT NULL, age int4)"
        ))
        .await
        .unwrap();

    let rows = Value::from(json!([
        { "id": 1, "name": "abe", "age": 42 },
        { "id": 2, "name": "ben", "age": 31 }
    ]));
    let q = insert(&table, &rows).unwrap();
    assert_eq!(client.execute(q.text(), &q.params_ref()).await.unwrap(), 2);

    let q = upsert(&table, &["id"], &Value::from(json!({ "id": 1, "name": "abe", "age": 43 }))).unwrap();
    client.execute(q.text(), &q.params_ref()).await.unwrap();

    let filter = Value::from(json!({ "age": { "gt": 40 }, "name": { "ne": null } }));
    let q = sql!(
        "SELECT name, age FROM " {ident(&table)} " " {where_clause(None, &filter).unwrap()}
        " " {order_by(None, &["-age"]).unwrap()} " " {limit(10).unwrap()}
    );
    let found = client.query(q.text(), &q.params_ref()).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get::<_, String>("name"), "abe");
    assert_eq!(found[0].get::<_, i32>("age"), 43);
}

#[tokio::test]
async fn filters_on_text_parsed_columns() {
    let Some(client) = try_connect("filters_on_text_parsed_columns").await else {
        return;
    };

    let table = format!("pgfrag_typed_{}", std::process::id());
    client
        .batch_execute(&format!(
            "CREATE TEMP TABLE {table} (
                id uuid PRIMARY KEY,
                born date NOT NULL,
                seen_at timestamptz NOT NULL,
                price numeric NOT NULL
            );
            INSERT INTO {table} VALUES
                ('3f333df6-90a4-4fda-8dd3-9485d27cee36', '1990-05-01', '2024-03-01T10:00:00Z', 12.50),
                ('9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d', '2001-09-12', '2023-11-20T08:30:00Z', 7)"
        ))
        .await
        .unwrap();

    let filter = Value::from(json!({
        "born": { "lt": "2000-01-01" },
        "id": "3f333df6-90a4-4fda-8dd3-9485d27cee36",
        "price": { "gt": 10 },
        "seen_at": { "gte": "2024-01-01T00:00:00Z" }
    }));
    let q = sql!(
        "SELECT id::text AS id FROM " {ident(&table)} " " {where_clause(None, &filter).unwrap()}
    );
    let found = client.query(q.text(), &q.params_ref()).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].get::<_, String>("id"),
        "3f333df6-90a4-4fda-8dd3-9485d27cee36"
    );

    let q = sql!("SELECT " {42.0} "::int4 + 1 AS n");
    let row = client.query_one(q.text(), &q.params_ref()).await.unwrap();
    assert_eq!(row.get::<_, i32>("n"), 43);
}
