use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use docsum_backend::config::AppConfig;
use docsum_backend::routes::{chunks, health, sentiment, summarize};
use docsum_backend::services::llm_provider::LlmClient;
use docsum_backend::services::sentiment::SentimentClassifier;
use docsum_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!(
        "Configuration loaded (env: {}, provider: {}, model: {})",
        std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()),
        config.llm.provider,
        config.llm.model
    );

    let llm = LlmClient::from_config(&config.llm).context("Failed to create LLM client")?;
    let classifier = SentimentClassifier::new();

    let max_upload_bytes = config.upload.max_file_size_mb * 1024 * 1024;
    let state = AppState::new(config.clone(), llm, classifier);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/chunks/preview", post(chunks::preview))
        .route("/api/sentiment", post(sentiment::classify))
        .route("/api/summarize", post(summarize::summarize_upload))
        .route("/api/summarize/path", post(summarize::summarize_path))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
