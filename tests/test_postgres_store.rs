//! End-to-end test against a live PostgreSQL:
//! 1) Bootstrap the database (create if absent + migrations).
//! 2) Serve the router on an ephemeral port.
//! 3) Exercise the book routes over HTTP, including concurrent same-name creates.
//!
//! Skipped unless `DB_SERVER_IP` is set (directly or through `.env`).

use library_app::app::database;
use library_app::infra::config::{self, AppConfig};
use library_app::transport;
use library_app::{BookStore, PgBookStore};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}", prefix, nanos)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_postgres_store() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    if std::env::var(config::DB_SERVER_IP).is_err() {
        println!("DB_SERVER_IP not set; skipping live PostgreSQL test");
        return Ok(());
    }
    library_app::infra::telemetry::init_tracing();

    let app_config = AppConfig::from_env()?;
    let pool = database::initialize(&app_config.database).await?;
    // A second bootstrap must be a no-op against an existing database.
    database::initialize(&app_config.database).await?;

    let store = Arc::new(PgBookStore::new(pool));
    let router = transport::http::create_router(transport::http::AppState::new(store.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let base_url = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();

    let list_len = |client: reqwest::Client, url: String| async move {
        let books: Vec<JsonValue> = client.get(url).send().await?.json().await?;
        Ok::<usize, reqwest::Error>(books.len())
    };
    let rows_before = list_len(client.clone(), format!("{}/books", base_url)).await?;

    // --- Lifecycle ---
    let name = unique("Dune");
    let created: JsonValue = client
        .post(format!("{}/book", base_url))
        .json(&json!({"book_name": name, "book_cost": 15}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(created["book_name"], name.as_str());
    assert_eq!(created["book_cost"], 15);
    let id = created["book_id"].as_i64().unwrap();
    assert!(id > 0);

    let again: JsonValue = client
        .post(format!("{}/book", base_url))
        .json(&json!({"book_name": name, "book_cost": 99}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(again, created);

    let updated: JsonValue = client
        .put(format!("{}/book", base_url))
        .json(&json!({"book_name": name, "book_cost": 20}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated, json!({"book_id": id, "book_name": name, "book_cost": 20}));

    let got: JsonValue = client
        .get(format!("{}/book", base_url))
        .json(&json!({"book_name": name}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(got, updated);

    let missing = unique("Valis");
    let resp = client
        .put(format!("{}/book", base_url))
        .json(&json!({"book_name": missing, "book_cost": 1}))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["book_name"], "");
    assert!(store.find_one_by_name(&missing).await?.is_none());

    let deleted: JsonValue = client
        .delete(format!("{}/book", base_url))
        .json(&json!({"book_name": name}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(deleted, updated);

    let gone: JsonValue = client
        .get(format!("{}/book", base_url))
        .json(&json!({"book_name": name}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(gone, json!({"book_id": 0, "book_name": "", "book_cost": 0}));

    // --- Costs beyond 32 bits fit the BIGINT column ---
    let big_name = unique("Big");
    let big: JsonValue = client
        .post(format!("{}/book", base_url))
        .json(&json!({"book_name": big_name, "book_cost": 5_000_000_000_u64}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(big["book_cost"], 5_000_000_000_u64);
    assert_eq!(store.find_one_by_name(&big_name).await?.unwrap().cost, 5_000_000_000);
    store.delete_by_name(&big_name).await?;

    // --- Concurrent creates for one name insert a single row ---
    let contested = unique("Solaris");
    let mut tasks = Vec::new();
    for cost in 0..8u32 {
        let client = client.clone();
        let url = format!("{}/book", base_url);
        let body = json!({"book_name": contested, "book_cost": cost});
        tasks.push(tokio::spawn(async move {
            client.post(url).json(&body).send().await?.json::<JsonValue>().await
        }));
    }
    let mut ids = Vec::new();
    for task in tasks {
        ids.push(task.await??["book_id"].as_i64().unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 1, "all creates must observe the same row");

    let rows_after = list_len(client.clone(), format!("{}/books", base_url)).await?;
    assert!(rows_after >= rows_before + 1);
    assert_eq!(
        store
            .find_all()
            .await?
            .iter()
            .filter(|b| b.name == contested)
            .count(),
        1
    );

    store.delete_by_name(&contested).await?;
    server_handle.abort();
    Ok(())
}
