use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::schema;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Base to compare against the reference.
    #[serde(default = "default_db")]
    pub db: String,
    /// Name of the environment variable holding the reference base id,
    /// resolved against the startup snapshot.
    #[serde(rename = "ref", default = "default_ref")]
    pub ref_env: String,
}

fn default_db() -> String {
    "module".to_string()
}

fn default_ref() -> String {
    "FWK_DB_ID".to_string()
}

/// GET /architecte/compare - diff a base's schema against a reference base
pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Value>, ApiError> {
    let base_id = state.resolve_alias(&query.db)?;
    let ref_id = state
        .config
        .ref_ids
        .get(&query.ref_env)
        .cloned()
        .ok_or_else(|| ApiError::bad_request(format!("unknown reference: {}", query.ref_env)))?;

    tracing::info!(base = %query.db, reference = %query.ref_env, "comparing base schemas");
    let current = state.upstream.get_schema(&base_id).await?;
    let reference = state.upstream.get_schema(&ref_id).await?;
    let diff = schema::diff(&reference, &current);

    Ok(Json(json!({
        "status": "ok",
        "base": query.db,
        "ref_env": query.ref_env,
        "missing": diff.missing,
        "extra": diff.extra,
        "type_mismatch": diff.type_mismatch,
    })))
}
