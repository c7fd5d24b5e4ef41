use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::config::{mask_secret, ALIAS_VARS};
use crate::state::AppState;

/// Route table surfaced by /debug/routes, kept in sync with the router by
/// the integration tests.
pub const ROUTES: &[(&str, &str, bool)] = &[
    ("GET", "/", false),
    ("GET", "/docs", false),
    ("GET", "/healthcheck", false),
    ("GET", "/architecte/version", false),
    ("GET", "/architecte/analyse", false),
    ("GET", "/architecte/rows", false),
    ("GET", "/architecte/compare", true),
    ("POST", "/architecte/edit", true),
    ("POST", "/architecte/delete", true),
    ("POST", "/architecte/update", true),
    ("POST", "/architecte/sync", true),
    ("GET|POST", "/architecte/log", true),
    ("GET|POST", "/architecte/logtest", true),
    ("GET", "/debug/env_status", false),
    ("GET", "/debug/routes", false),
];

/// GET /debug/env_status - presence and masked value of each configured
/// secret. Raw values never leave the process.
pub async fn env_status(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;

    let databases: Value = ALIAS_VARS
        .iter()
        .map(|(alias, var)| {
            let entry = match config.aliases.get(*alias) {
                Some(id) => json!({ "present": true, "value": mask_secret(id) }),
                None => json!({ "present": false, "value": null }),
            };
            ((*var).to_string(), entry)
        })
        .collect::<serde_json::Map<String, Value>>()
        .into();

    Json(json!({
        "NOTION_TOKEN": secret_entry(config.upstream_token.as_deref()),
        "ARCHITECTE_TOKEN": secret_entry(config.shared_secret.as_deref()),
        "databases": databases,
    }))
}

fn secret_entry(value: Option<&str>) -> Value {
    match value {
        Some(v) => json!({ "present": true, "value": mask_secret(v) }),
        None => json!({ "present": false, "value": null }),
    }
}

/// GET /debug/routes - introspective route listing
pub async fn routes() -> Json<Value> {
    let routes: Vec<Value> = ROUTES
        .iter()
        .map(|(method, path, gated)| {
            json!({ "method": method, "path": path, "token_gated": gated })
        })
        .collect();

    Json(json!({ "status": "ok", "routes": routes }))
}
