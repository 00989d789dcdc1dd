// ABOUTME: Main entry point for the ViaTour recommendation server
// ABOUTME: Wires configuration, database, LLM provider, and HTTP routes together

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! ViaTour conversational tour recommendation server

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use viatour_server::config::ServerConfig;
use viatour_server::database::Database;
use viatour_server::llm::{GeminiProvider, LlmProvider};
use viatour_server::logging;
use viatour_server::resources::ServerResources;
use viatour_server::routes;

/// ViaTour conversational tour recommendation server
#[derive(Parser)]
#[command(name = "viatour-server", version, about)]
struct Args {
    /// HTTP port to listen on (overrides HTTP_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env().context("Failed to initialize logging")?;

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    info!("Starting viatour-server: {}", config.summary());

    let database = Database::new(&config.database_url.to_connection_string())
        .await
        .context("Failed to open database")?;

    if config.llm.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; extraction and generation will run degraded");
    }
    let provider = GeminiProvider::new(config.llm.api_key.clone().unwrap_or_default())
        .with_default_model(config.llm.model.clone());
    let llm: Arc<dyn LlmProvider> = Arc::new(provider);

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, llm, config));

    let app = routes::router(resources).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
