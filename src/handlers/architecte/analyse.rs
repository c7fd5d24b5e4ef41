use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyseQuery {
    /// Short alias of the base to analyse (fwk, agent, module, logs).
    #[serde(default = "default_db")]
    pub db: String,
}

fn default_db() -> String {
    "fwk".to_string()
}

/// GET /architecte/analyse - property schema of a configured base
pub async fn analyse(
    State(state): State<AppState>,
    Query(query): Query<AnalyseQuery>,
) -> Result<Json<Value>, ApiError> {
    let database_id = state.resolve_alias(&query.db)?;

    tracing::info!(base = %query.db, "analysing base schema");
    let schema = state.upstream.get_schema(&database_id).await?;

    Ok(Json(json!({
        "status": "ok",
        "base": query.db,
        "schema": schema,
    })))
}
