pub mod disabled;
pub mod http;

pub use disabled::DisabledUpstream;
pub use http::HttpUpstream;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppConfig;
use crate::schema::Schema;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream client not configured")]
    Unavailable,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream call timed out")]
    Timeout,
    #[error("upstream rejected the call ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Capability interface over the remote structured-data store. Every call is
/// a single synchronous round trip; no retained state beyond the client
/// handle. The implementation is selected once at startup from available
/// configuration, never probed per call.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Retrieve a database's property schema. Idempotent, safe to retry.
    async fn get_schema(&self, database_id: &str) -> Result<Schema, UpstreamError>;

    /// One page of rows in the store's natural ordering. The HTTP boundary
    /// validates the limit; this accepts the resolved value.
    async fn list_rows(&self, database_id: &str, limit: u32) -> Result<Vec<Value>, UpstreamError>;

    /// Create a page in a database, returning its upstream id.
    async fn create_page(&self, database_id: &str, properties: Value)
        -> Result<String, UpstreamError>;

    /// Merge the given properties into an existing page.
    async fn update_page(&self, page_id: &str, properties: Value) -> Result<(), UpstreamError>;

    /// Set a page's archived flag.
    async fn archive_page(&self, page_id: &str) -> Result<(), UpstreamError>;
}

/// Select the upstream implementation for this process. With a token the
/// HTTP client is used; without one every remote operation reports
/// `Unavailable` instead of crashing the process.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn Upstream>, UpstreamError> {
    match config.upstream_token.as_deref() {
        Some(token) => {
            let client =
                HttpUpstream::new(&config.upstream_base, token, config.upstream_timeout)?;
            Ok(Arc::new(client))
        }
        None => {
            tracing::warn!("NOTION_TOKEN not set: remote operations are disabled");
            Ok(Arc::new(DisabledUpstream))
        }
    }
}
