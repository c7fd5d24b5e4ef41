use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::{Upstream, UpstreamError};
use crate::schema::Schema;

/// Wire protocol revision pinned for every call.
const NOTION_VERSION: &str = "2022-06-28";

/// Raw-HTTP client for the upstream store. Stateless apart from the pooled
/// connection handle; each call is bounded by the configured timeout.
pub struct HttpUpstream {
    client: reqwest::Client,
    base: String,
    token: String,
}

impl HttpUpstream {
    pub fn new(base: &str, token: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Send a prepared request and decode the JSON body, mapping non-success
    /// statuses into the upstream error taxonomy.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value, UpstreamError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { UpstreamError::Timeout } else { e.into() })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<Value>().await.map_err(|e| UpstreamError::Api {
                status: status.as_u16(),
                message: format!("malformed upstream payload: {e}"),
            });
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("upstream returned status {status}"));

        if status == StatusCode::NOT_FOUND {
            Err(UpstreamError::NotFound(message))
        } else {
            Err(UpstreamError::Api { status: status.as_u16(), message })
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get_schema(&self, database_id: &str) -> Result<Schema, UpstreamError> {
        let url = self.endpoint(&format!("/v1/databases/{database_id}"));
        let body = self.execute(self.client.get(url)).await?;

        let properties = body.get("properties").ok_or_else(|| UpstreamError::Api {
            status: 200,
            message: "upstream payload missing properties".to_string(),
        })?;
        Ok(Schema::from_properties(properties))
    }

    async fn list_rows(&self, database_id: &str, limit: u32) -> Result<Vec<Value>, UpstreamError> {
        let url = self.endpoint(&format!("/v1/databases/{database_id}/query"));
        let body = self.execute(self.client.post(url).json(&json!({ "page_size": limit }))).await?;

        Ok(body.get("results").and_then(Value::as_array).cloned().unwrap_or_default())
    }

    async fn create_page(
        &self,
        database_id: &str,
        properties: Value,
    ) -> Result<String, UpstreamError> {
        let payload = json!({
            "parent": { "database_id": database_id },
            "properties": properties,
        });
        let body = self.execute(self.client.post(self.endpoint("/v1/pages")).json(&payload)).await?;

        body.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| UpstreamError::Api {
                status: 200,
                message: "created page carries no id".to_string(),
            })
    }

    async fn update_page(&self, page_id: &str, properties: Value) -> Result<(), UpstreamError> {
        let url = self.endpoint(&format!("/v1/pages/{page_id}"));
        self.execute(self.client.patch(url).json(&json!({ "properties": properties }))).await?;
        Ok(())
    }

    async fn archive_page(&self, page_id: &str) -> Result<(), UpstreamError> {
        let url = self.endpoint(&format!("/v1/pages/{page_id}"));
        self.execute(self.client.patch(url).json(&json!({ "archived": true }))).await?;
        Ok(())
    }
}
