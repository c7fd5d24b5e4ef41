use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::upstream::Upstream;

/// Shared application state: the immutable configuration and the long-lived
/// upstream client handle. Populated once at startup and read-only
/// afterwards, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(config: AppConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self { config: Arc::new(config), upstream }
    }

    /// Resolve a database alias to its upstream identifier. Total and pure:
    /// an unconfigured alias fails with the same `BadRequest` kind on every
    /// endpoint, before any remote call.
    pub fn resolve_alias(&self, alias: &str) -> Result<String, ApiError> {
        self.config
            .aliases
            .get(alias)
            .cloned()
            .ok_or_else(|| ApiError::bad_request(format!("unknown base: {alias}")))
    }
}
