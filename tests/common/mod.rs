#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use homeinventory::{NameCollation, RoomStore};
use serde_json::Value;
use tower::ServiceExt;

pub async fn test_app() -> Router {
    test_app_with(NameCollation::Binary).await
}

pub async fn test_app_with(collation: NameCollation) -> Router {
    // RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let store = RoomStore::in_memory(collation)
        .await
        .expect("in-memory store");
    homeinventory::app(store)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse { status, headers, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

/// Creates a room and returns its id.
pub async fn create_room(app: &Router, name: &str) -> i64 {
    let res = send(
        app,
        Method::POST,
        "/api/v1/rooms",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "creating {name}");
    res.json()["id"].as_i64().expect("numeric id")
}
