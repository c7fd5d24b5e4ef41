use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub db: Option<String>,
}

/// POST /architecte/edit - create a page in the given base from a property map
pub async fn edit(
    State(state): State<AppState>,
    Query(query): Query<EditQuery>,
    Json(properties): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let db = query.db.ok_or_else(|| ApiError::bad_request("missing db parameter"))?;
    let database_id = state.resolve_alias(&db)?;
    if !properties.is_object() {
        return Err(ApiError::bad_request("request body must be a property map"));
    }

    tracing::info!(base = %db, "creating page");
    let page_id = state.upstream.create_page(&database_id, properties).await?;

    Ok(Json(json!({
        "status": "ok",
        "db": db,
        "id": page_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    pub page_id: String,
}

/// POST /architecte/delete - archive an existing page
pub async fn delete(
    State(state): State<AppState>,
    Json(body): Json<DeleteBody>,
) -> Result<Json<Value>, ApiError> {
    if body.page_id.is_empty() {
        return Err(ApiError::bad_request("page_id missing"));
    }

    tracing::info!(page_id = %body.page_id, "archiving page");
    state.upstream.archive_page(&body.page_id).await?;

    Ok(Json(json!({
        "status": "ok",
        "message": format!("page {} archived", body.page_id),
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub page_id: String,
    pub fields: Value,
}

/// POST /architecte/update - merge fields into an existing page
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Value>, ApiError> {
    if body.page_id.is_empty() {
        return Err(ApiError::bad_request("page_id missing"));
    }
    if !body.fields.is_object() {
        return Err(ApiError::bad_request("fields must be a property map"));
    }

    tracing::info!(page_id = %body.page_id, "updating page fields");
    state.upstream.update_page(&body.page_id, body.fields).await?;

    Ok(Json(json!({
        "status": "ok",
        "message": format!("page {} updated", body.page_id),
    })))
}
