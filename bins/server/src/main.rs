//! Meridian API Server
//!
//! Main entry point for the Meridian dashboard backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_api::{AppState, ExportSettings, create_router};
use meridian_db::connect_with_pool;
use meridian_shared::{AppConfig, GeminiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let gemini = GeminiClient::new(config.gemini.clone());
    if gemini.is_configured() {
        info!(model = %config.gemini.model, "Language model configured");
    } else {
        warn!("No language model API key configured, AI issue drafting is disabled");
    }

    let export = ExportSettings::from_config(&config.export)
        .map_err(|tz| anyhow::anyhow!("Unknown export timezone: {tz}"))?;
    info!(timezone = %export.tz, "Export settings loaded");

    let state = AppState {
        db: Arc::new(db),
        gemini: Arc::new(gemini),
        export: Arc::new(export),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
