use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skillfit::analysis::pipeline::SkillGapAnalyzer;
use skillfit::config::Config;
use skillfit::llm_client::{LlmClient, TextGenerator};
use skillfit::report::MarkdownReportRenderer;
use skillfit::routes::build_router;
use skillfit::state::AppState;

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

    info!("Starting SkillFit API v{}", env!("CARGO_PKG_VERSION"));

    // One client per process, shared by extraction and roadmap generation
    let llm = LlmClient::new(&config.llm).context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (provider: {:?}, model: {}, timeout: {:?})",
        llm.provider(),
        llm.model(),
        config.llm.timeout
    );
    let llm: Arc<dyn TextGenerator> = Arc::new(llm);

    let analyzer = SkillGapAnalyzer::new(llm, config.match_threshold, config.roadmap_concurrency);
    info!(
        "Analyzer ready: match threshold {}, roadmap concurrency {}",
        config.match_threshold, config.roadmap_concurrency
    );

    // Build app state
    let state = AppState {
        analyzer: Arc::new(analyzer),
        renderer: Arc::new(MarkdownReportRenderer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the upload UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
