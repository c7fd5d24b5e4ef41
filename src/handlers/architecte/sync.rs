use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::REFERENCE_ALIAS;
use crate::error::ApiError;
use crate::schema;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    #[serde(default = "default_db")]
    pub db: String,
}

fn default_db() -> String {
    "module".to_string()
}

/// POST /architecte/sync - properties of the canonical reference base that
/// the target base lacks
pub async fn sync(
    State(state): State<AppState>,
    Query(query): Query<SyncQuery>,
) -> Result<Json<Value>, ApiError> {
    let base_id = state.resolve_alias(&query.db)?;
    let ref_id = state.resolve_alias(REFERENCE_ALIAS)?;

    let current = state.upstream.get_schema(&base_id).await?;
    let reference = state.upstream.get_schema(&ref_id).await?;
    let diff = schema::diff(&reference, &current);

    tracing::info!(
        base = %query.db,
        missing = diff.missing.len(),
        "synchronization check complete"
    );

    Ok(Json(json!({
        "status": "ok",
        "base": query.db,
        "missing_properties": diff.missing,
        "message": format!("{} missing properties detected", diff.missing.len()),
    })))
}
