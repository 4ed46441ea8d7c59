#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use notes_api::config::ServerConfig;
use notes_api::router::build_app_router;
use notes_api::state::AppState;
use notes_db::memory::MemoryNoteStore;
use notes_db::store::{NoteStore, PgNoteStore, StoreBackend};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(backend: StoreBackend) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        backend,
        database_url: None,
        enhance_schema: false,
    }
}

/// Build the full application router around `store`.
pub fn build_test_app(store: Arc<dyn NoteStore>, backend: StoreBackend) -> Router {
    let config = test_config(backend);
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// App backed by a fresh in-memory store.
pub fn memory_app() -> Router {
    build_test_app(Arc::new(MemoryNoteStore::new()), StoreBackend::Memory)
}

/// App backed by PostgreSQL.
pub fn pg_app(pool: PgPool) -> Router {
    build_test_app(Arc::new(PgNoteStore::new(pool)), StoreBackend::Postgres)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Create a note through the API and return its JSON.
pub async fn create_note(app: &Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/v1/notes", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Names of the listed notes, in order.
pub async fn listed_names(app: &Router) -> Vec<String> {
    let json = body_json(get(app.clone(), "/api/v1/notes").await).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
