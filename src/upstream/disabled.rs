use async_trait::async_trait;
use serde_json::Value;

use super::{Upstream, UpstreamError};
use crate::schema::Schema;

/// Selected when no upstream token is configured: every remote operation
/// fails with `Unavailable` while the process keeps serving requests.
pub struct DisabledUpstream;

#[async_trait]
impl Upstream for DisabledUpstream {
    async fn get_schema(&self, _database_id: &str) -> Result<Schema, UpstreamError> {
        Err(UpstreamError::Unavailable)
    }

    async fn list_rows(&self, _database_id: &str, _limit: u32) -> Result<Vec<Value>, UpstreamError> {
        Err(UpstreamError::Unavailable)
    }

    async fn create_page(
        &self,
        _database_id: &str,
        _properties: Value,
    ) -> Result<String, UpstreamError> {
        Err(UpstreamError::Unavailable)
    }

    async fn update_page(&self, _page_id: &str, _properties: Value) -> Result<(), UpstreamError> {
        Err(UpstreamError::Unavailable)
    }

    async fn archive_page(&self, _page_id: &str) -> Result<(), UpstreamError> {
        Err(UpstreamError::Unavailable)
    }
}
