use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use voicechat_backend::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    tokio::fs::create_dir_all(&config.static_dir)
        .await
        .with_context(|| format!("creating static dir {}", config.static_dir.display()))?;

    let bind_addr = config.bind_addr.clone();
    let static_dir = config.static_dir.clone();
    let state = Arc::new(AppState::connect(config).await);

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router(static_dir)
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!("voice chat relay listening on http://{bind_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
