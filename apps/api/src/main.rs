mod cache;
mod config;
mod db;
mod errors;
mod github;
mod jobs;
mod llm_client;
mod models;
mod parsing;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::github::GithubClient;
use crate::llm_client::LlmClient;
use crate::parsing::ResumeParser;
use crate::routes::build_router;
use crate::scoring::relevance::{LlmRelevanceScorer, RelevanceScorer, RuleBasedScorer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResuMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Compile extractors once; handlers share them through AppState
    let parser = Arc::new(ResumeParser::new());
    info!("Resume parser initialized");

    let github = GithubClient::new(config.github_token.clone());
    info!(
        "GitHub client initialized (authenticated: {})",
        config.github_token.is_some()
    );

    // Scorer backend is fixed at startup; a failed LLM call never falls back
    // to the rule-based path.
    let scorer: Arc<dyn RelevanceScorer> = match &config.cerebras_api_key {
        Some(key) => {
            info!(
                "LLM relevance scorer initialized (model: {})",
                config.cerebras_model
            );
            Arc::new(LlmRelevanceScorer::new(LlmClient::new(
                key.clone(),
                config.cerebras_model.clone(),
            )))
        }
        None => {
            warn!("CEREBRAS_API_KEY not set; using rule-based relevance scoring");
            Arc::new(RuleBasedScorer)
        }
    };

    // Build app state
    let state = AppState {
        db,
        parser,
        github,
        scorer,
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
