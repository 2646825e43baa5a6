//! End-to-end lifecycle test: create, read, partially update, delete a person over real HTTP.
//!
//! Runs against the in-memory backend by default. Set `STORAGE_BACKEND=postgres` and
//! `DATABASE_URL` to run the same flow against PostgreSQL.

use person_rest_api::infra::config::Settings;
use person_rest_api::{storage, transport, PersonService};
use serde_json::{json, Value};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_person_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::from_env()?;
    if std::env::var("STORAGE_BACKEND").is_err() {
        settings.storage = person_rest_api::infra::StorageKind::Memory;
    }

    let store = storage::connect(&settings).await?;
    let app_state = transport::http::AppState::new(PersonService::new(store), settings);
    let router = transport::http::create_app(app_state);

    // Bind to an ephemeral port to avoid conflicts if an API server is already running.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let base_url = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();

    // Unique email so reruns against a persistent database do not collide.
    let email = format!("john.doe+{}@example.com", uuid::Uuid::new_v4().simple());

    // --- CREATE ---
    let resp = client
        .post(format!("{}/persons", base_url))
        .json(&json!({ "name": "John Doe", "age": 30, "email": email }))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    let created: Value = resp.json().await?;
    let id = created["id"].as_str().expect("id in response").to_string();
    assert_eq!(created["name"], "John Doe");
    assert_eq!(created["age"], 30);
    assert_eq!(created["email"], email.as_str());
    assert_eq!(created["phone"], Value::Null);

    // --- READ ---
    let resp = client
        .get(format!("{}/persons/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let fetched: Value = resp.json().await?;
    assert_eq!(fetched, created);

    let listed: Vec<Value> = client
        .get(format!("{}/persons", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert!(listed.iter().any(|p| p["id"] == id.as_str()));

    // --- PARTIAL UPDATE ---
    let resp = client
        .put(format!("{}/persons/{}", base_url, id))
        .json(&json!({ "age": 31 }))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let updated: Value = resp.json().await?;
    assert_eq!(updated["age"], 31);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["phone"], created["phone"]);

    // --- DELETE ---
    let resp = client
        .delete(format!("{}/persons/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
    assert!(resp.bytes().await?.is_empty());

    let resp = client
        .get(format!("{}/persons/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    // --- HEALTH ---
    let health: Value = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"]["database"], "connected");

    server_handle.abort();
    Ok(())
}
