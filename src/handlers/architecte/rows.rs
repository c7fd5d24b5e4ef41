use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::schema::Row;
use crate::state::AppState;

const DEFAULT_LIMIT: u32 = 25;

#[derive(Debug, Deserialize)]
pub struct RowsQuery {
    #[serde(default = "default_db")]
    pub db: String,
    /// Page size, 1..=100.
    pub limit: Option<u32>,
}

fn default_db() -> String {
    "fwk".to_string()
}

/// GET /architecte/rows - one page of rows with derived display titles
pub async fn rows(
    State(state): State<AppState>,
    Query(query): Query<RowsQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=100).contains(&limit) {
        return Err(ApiError::bad_request("limit must be between 1 and 100"));
    }
    let database_id = state.resolve_alias(&query.db)?;

    tracing::info!(base = %query.db, limit, "listing rows");
    let schema = state.upstream.get_schema(&database_id).await?;
    let pages = state.upstream.list_rows(&database_id, limit).await?;
    let items: Vec<Row> = pages.iter().map(|page| Row::from_page(&schema, page)).collect();

    Ok(Json(json!({
        "status": "ok",
        "base": query.db,
        "count": items.len(),
        "items": items,
    })))
}
