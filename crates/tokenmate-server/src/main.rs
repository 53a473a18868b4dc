//! TokenMate HTTP Server
//!
//! Axum-based server exposing the chat endpoint.
//!
//! Prompts are enriched with live CoinGecko prices when a message names a
//! known coin, unless `MARKET_DATA_ENABLED=false`.

mod app;
mod config;
mod handlers;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokenmate_core::{ChatAgent, ContextSource};
use tokenmate_market::{CoinGeckoClient, MarketContextSource};
use tokenmate_runtime::OpenAiProvider;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize LLM provider
    let provider = OpenAiProvider::from_env()?;
    let generation = provider.config().generation_options();
    tracing::info!(
        model = %generation.model,
        temperature = generation.temperature,
        "✓ OpenAI provider configured"
    );

    let mut builder = ChatAgent::builder()
        .provider(Arc::new(provider))
        .model(generation.model)
        .temperature(generation.temperature);

    // Market data enrichment
    if config.market_data_enabled {
        let client = CoinGeckoClient::from_env()?;
        let source: Arc<dyn ContextSource> = Arc::new(MarketContextSource::new(Arc::new(client)));
        builder = builder.context_source(source);
        tracing::info!("✓ Market data enabled (CoinGecko)");
    } else {
        tracing::warn!("⚠ Market data disabled - prompts will not include live prices");
    }

    let state = AppState {
        agent: Arc::new(builder.build()?),
    };

    let app = app::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 TokenMate server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health   - Health check");
    tracing::info!("  POST /api/chat - Send message");

    axum::serve(listener, app).await?;

    Ok(())
}
