mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod sources;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, GenerativeModel};
use crate::routes::build_router;
use crate::sources::HttpFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, not on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Flashlight API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; without a key the server runs degraded
    let llm: Option<Arc<dyn GenerativeModel>> = match &config.google_api_key {
        Some(key) => {
            let client = GeminiClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            error!("GOOGLE_API_KEY is not set; every analysis request will fail until it is configured");
            None
        }
    };

    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout)?);
    info!(
        "Profile fetcher initialized (timeout: {}s, summary policy: {:?})",
        config.fetch_timeout.as_secs(),
        config.summary_failure_policy
    );

    let cors = build_cors(config.cors_allowed_origin.as_deref())?;

    let state = AppState {
        config: config.clone(),
        fetcher,
        llm,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// A single allowed origin when configured, permissive otherwise.
fn build_cors(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    Ok(match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    })
}
