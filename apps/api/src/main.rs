mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod letters;
mod llm_client;
mod models;
mod pdf;
mod profiles;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::HttpLetterGenerator;
use crate::pdf::PdfClient;
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

    info!("Starting Missive API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the generation backend. The service holds no model API key;
    // each call is authorized with the caller's own bearer credential.
    let generator = Arc::new(HttpLetterGenerator::new(config.llm_api_url.clone()));
    info!("Generation client initialized (endpoint: {})", config.llm_api_url);

    // Initialize the PDF compile bridge
    let pdf = PdfClient::new(config.pdf_compile_url.clone());
    info!("PDF compile bridge initialized (endpoint: {})", config.pdf_compile_url);

    // Build app state
    let state = AppState {
        db,
        generator,
        pdf,
        config: config.clone(),
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
