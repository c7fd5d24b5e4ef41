use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::{AuditLog, LogLevel};
use crate::state::AppState;

fn default_message() -> String {
    "manual log entry".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LogBody {
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default = "default_level")]
    pub level: String,
}

/// POST /architecte/log - write an entry to the logs base
pub async fn log_post(
    State(state): State<AppState>,
    Json(body): Json<LogBody>,
) -> Result<Json<Value>, ApiError> {
    write_entry(&state, &body.message, LogLevel::parse(&body.level), body.context.as_ref()).await
}

/// GET /architecte/log - same write, parameters from the query string
pub async fn log_get(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Value>, ApiError> {
    write_entry(&state, &query.message, LogLevel::parse(&query.level), None).await
}

/// GET|POST /architecte/logtest - write a fixed probe entry
pub async fn logtest(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let message = format!("logtest probe at {}", Utc::now().to_rfc3339());
    write_entry(&state, &message, LogLevel::Info, None).await
}

/// Shared tail of the log endpoints. The write itself is best-effort: a
/// failed upstream call yields `page_id: null`, never an error response.
async fn write_entry(
    state: &AppState,
    message: &str,
    level: LogLevel,
    context: Option<&Value>,
) -> Result<Json<Value>, ApiError> {
    let database_id = state
        .config
        .aliases
        .get("logs")
        .cloned()
        .ok_or_else(|| ApiError::upstream_unavailable("logs base not configured"))?;

    let audit = AuditLog::new(state.upstream.clone(), database_id);
    let page_id = audit.write(message, level, context).await;

    Ok(Json(json!({
        "status": "ok",
        "base": "logs",
        "page_id": page_id,
    })))
}
