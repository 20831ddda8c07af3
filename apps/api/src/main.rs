mod assistant;
mod components;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod projects;
mod reviews;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::DesignAssistant;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DesignStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Atelier API v{}", env!("CARGO_PKG_VERSION"));

    // Persistence: PostgreSQL when configured, in-memory otherwise
    let store: Arc<dyn DesignStore> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL is not set; using the in-memory store (data is lost on exit)");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(&config.ai).context("Failed to build the AI HTTP client")?;
    if config.ai.api_key.is_empty() {
        warn!("AI_API_KEY is not set; AI calls will fail and fall back to defaults");
    }
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.ai.timeout.as_secs()
    );

    let state = AppState {
        store,
        assistant: DesignAssistant::new(Arc::new(llm)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
