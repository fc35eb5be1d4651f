#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use catalog_core::types::DbId;
use catalog_db::models::PersistedRecord;
use catalog_db::{MemoryStore, Store, StoreError};
use catalog_events::EventBus;
use http_body_util::BodyExt;
use tower::ServiceExt;

use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::{AppState, Stores};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        audit_bus_capacity: 64,
    }
}

/// A router over fresh in-memory stores, plus the bus it publishes to.
pub fn build_test_app() -> (Router, Arc<EventBus>) {
    build_app_with_stores(Stores::in_memory())
}

/// A router over caller-supplied stores.
pub fn build_app_with_stores(stores: Stores) -> (Router, Arc<EventBus>) {
    let config = Arc::new(test_config());
    let event_bus = Arc::new(EventBus::new(config.audit_bus_capacity));
    let state = AppState::new(Arc::clone(&config), Arc::clone(&event_bus), None, stores);
    (build_app_router(state, &config), event_bus)
}

/// Reads succeed against an inner [`MemoryStore`]; every write is rejected.
pub struct FailingStore<R> {
    pub inner: MemoryStore<R>,
}

impl<R> FailingStore<R> {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl<R: PersistedRecord> Store<R> for FailingStore<R> {
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        self.inner.list().await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn add(&self, _record: R) -> Result<R, StoreError> {
        Err(StoreError::Rejected("disk full".into()))
    }

    async fn update(&self, _record: R) -> Result<R, StoreError> {
        Err(StoreError::Rejected("disk full".into()))
    }

    async fn remove(&self, _record: R) -> Result<(), StoreError> {
        Err(StoreError::Rejected("disk full".into()))
    }
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
