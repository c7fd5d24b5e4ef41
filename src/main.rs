use anyhow::Context;

use architecte_api::config::AppConfig;
use architecte_api::routes;
use architecte_api::state::AppState;
use architecte_api::upstream;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up NOTION_TOKEN, *_DB_ID, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    if config.shared_secret.is_none() {
        tracing::warn!("ARCHITECTE_TOKEN not set: token checks are disabled (development mode)");
    }
    tracing::info!(aliases = config.aliases.len(), "configured database aliases");

    let upstream = upstream::from_config(&config).context("failed to build upstream client")?;
    let state = AppState::new(config, upstream);

    let bind_addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("architecte-api listening on http://{}", bind_addr);
    axum::serve(listener, routes::app(state)).await.context("server")?;

    Ok(())
}
