mod catalog;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::store::CourseStore;
use crate::config::Config;
use crate::generation::audit::GenerationLog;
use crate::llm_client::OpenRouterClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting course catalog API v{}", env!("CARGO_PKG_VERSION"));

    // Load the course catalog (missing file is an empty catalog)
    let store = CourseStore::load(config.courses_file.clone()).await?;

    // Initialize the completion gateway
    let gateway = Arc::new(OpenRouterClient::new(
        config.openrouter_api_url.clone(),
        config.openrouter_api_key.clone(),
        config.model.clone(),
    ));
    info!("completion gateway initialized (model: {})", config.model);

    // Optional generation audit trail
    let audit = GenerationLog::new(config.generation_log.clone());
    if let Some(path) = &config.generation_log {
        info!("generation audit log: {}", path.display());
    }

    // Build app state
    let state = AppState {
        store,
        gateway,
        audit,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
