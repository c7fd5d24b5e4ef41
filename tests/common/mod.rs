use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use architecte_api::config::AppConfig;
use architecte_api::routes;
use architecte_api::schema::Schema;
use architecte_api::state::AppState;
use architecte_api::upstream::{Upstream, UpstreamError};

pub const TEST_TOKEN: &str = "secret-test-token";
pub const TOKEN_HEADER: &str = "x-architecte-token";

/// In-memory stand-in for the remote store. Seeded per test; write
/// operations are recorded for assertions.
#[derive(Default)]
pub struct MemoryUpstream {
    schemas: HashMap<String, Value>,
    rows: HashMap<String, Vec<Value>>,
    pages: Vec<String>,
    fail_create: bool,
    counter: AtomicUsize,
    pub calls: AtomicUsize,
    pub created: Mutex<Vec<(String, Value)>>,
    pub updated: Mutex<Vec<(String, Value)>>,
    pub archived: Mutex<Vec<String>>,
}

impl MemoryUpstream {
    pub fn with_database(mut self, database_id: &str, properties: Value) -> Self {
        self.schemas.insert(database_id.to_string(), properties);
        self
    }

    pub fn with_rows(mut self, database_id: &str, rows: Vec<Value>) -> Self {
        self.rows.insert(database_id.to_string(), rows);
        self
    }

    pub fn with_page(mut self, page_id: &str) -> Self {
        self.pages.push(page_id.to_string());
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }
}

#[async_trait]
impl Upstream for MemoryUpstream {
    async fn get_schema(&self, database_id: &str) -> Result<Schema, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.schemas
            .get(database_id)
            .map(Schema::from_properties)
            .ok_or_else(|| UpstreamError::NotFound(format!("database {database_id}")))
    }

    async fn list_rows(&self, database_id: &str, limit: u32) -> Result<Vec<Value>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.schemas.contains_key(database_id) {
            return Err(UpstreamError::NotFound(format!("database {database_id}")));
        }
        let rows = self.rows.get(database_id).cloned().unwrap_or_default();
        Ok(rows.into_iter().take(limit as usize).collect())
    }

    async fn create_page(
        &self,
        database_id: &str,
        properties: Value,
    ) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(UpstreamError::Api { status: 400, message: "invalid properties".into() });
        }
        if !self.schemas.contains_key(database_id) {
            return Err(UpstreamError::NotFound(format!("database {database_id}")));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push((database_id.to_string(), properties));
        Ok(format!("page-{n}"))
    }

    async fn update_page(&self, page_id: &str, properties: Value) -> Result<(), UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.pages.iter().any(|p| p == page_id) {
            return Err(UpstreamError::NotFound(format!("page {page_id}")));
        }
        self.updated.lock().unwrap().push((page_id.to_string(), properties));
        Ok(())
    }

    async fn archive_page(&self, page_id: &str) -> Result<(), UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.pages.iter().any(|p| p == page_id) {
            return Err(UpstreamError::NotFound(format!("page {page_id}")));
        }
        self.archived.lock().unwrap().push(page_id.to_string());
        Ok(())
    }
}

/// Upstream seeded with the three bases the tests lean on.
pub fn seeded_upstream() -> MemoryUpstream {
    MemoryUpstream::default()
        .with_database(
            "db-fwk",
            json!({
                "Name": {"type": "title"},
                "Status": {"type": "select"},
            }),
        )
        .with_database(
            "db-module",
            json!({
                "Name": {"type": "title"},
                "Owner": {"type": "people"},
            }),
        )
        .with_database(
            "db-logs",
            json!({
                "Description du changement": {"type": "title"},
                "Date du changement": {"type": "date"},
                "Type": {"type": "select"},
                "Meta": {"type": "rich_text"},
            }),
        )
}

/// Config with the standard alias set and the shared secret enabled.
pub fn test_config() -> AppConfig {
    config_from(&[
        ("FWK_DB_ID", "db-fwk"),
        ("MODULE_DB_ID", "db-module"),
        ("LOGS_DB_ID", "db-logs"),
        ("ARCHITECTE_TOKEN", TEST_TOKEN),
        ("NOTION_TOKEN", "ntn-test"),
    ])
}

pub fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let map: HashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|key| map.get(key).cloned())
}

pub fn build_app(config: AppConfig, upstream: MemoryUpstream) -> (Router, Arc<MemoryUpstream>) {
    let upstream = Arc::new(upstream);
    let router = routes::app(AppState::new(config, upstream.clone()));
    (router, upstream)
}

/// Default app: seeded upstream, secret enforced.
pub fn app() -> (Router, Arc<MemoryUpstream>) {
    build_app(test_config(), seeded_upstream())
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

pub async fn get_with_token(router: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header(TOKEN_HEADER, token)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

pub async fn post_json(
    router: &Router,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(router, request).await
}
