use axum::{
    middleware,
    response::{Json, Redirect},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{architecte, debug};
use crate::middleware::token_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    // Token-gated subset; the check is skipped entirely in development mode
    // (no shared secret configured).
    let gated = Router::new()
        .route("/architecte/compare", get(architecte::compare))
        .route("/architecte/edit", post(architecte::edit))
        .route("/architecte/delete", post(architecte::delete))
        .route("/architecte/update", post(architecte::update))
        .route("/architecte/sync", post(architecte::sync))
        .route("/architecte/log", get(architecte::log_get).post(architecte::log_post))
        .route("/architecte/logtest", get(architecte::logtest).post(architecte::logtest))
        .layer(middleware::from_fn_with_state(state.clone(), token_auth_middleware));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/docs", get(docs))
        .route("/healthcheck", get(healthcheck))
        .route("/architecte/version", get(version))
        .route("/architecte/analyse", get(architecte::analyse))
        .route("/architecte/rows", get(architecte::rows))
        .merge(gated)
        // Introspection
        .route("/debug/env_status", get(debug::env_status))
        .route("/debug/routes", get(debug::routes))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::temporary("/docs")
}

async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    }))
}

async fn docs() -> Json<Value> {
    Json(json!({
        "name": "Architecte API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "HTTP gateway over Notion databases",
        "endpoints": {
            "healthcheck": "GET /healthcheck (public)",
            "version": "GET /architecte/version (public)",
            "analyse": "GET /architecte/analyse?db=<alias> (public)",
            "rows": "GET /architecte/rows?db=<alias>&limit=<1..100> (public)",
            "compare": "GET /architecte/compare?db=<alias>&ref=<env-var> (token)",
            "edit": "POST /architecte/edit?db=<alias> (token)",
            "delete": "POST /architecte/delete (token)",
            "update": "POST /architecte/update (token)",
            "sync": "POST /architecte/sync?db=<alias> (token)",
            "log": "GET|POST /architecte/log (token)",
            "logtest": "GET|POST /architecte/logtest (token)",
            "env_status": "GET /debug/env_status (public)",
            "routes": "GET /debug/routes (public)",
        },
    }))
}
