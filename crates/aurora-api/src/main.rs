//! Aurora API server entry point.

use std::sync::Arc;

use aurora_api::config::AppConfig;
use aurora_api::error::AppError;
use aurora_api::state::AppState;
use aurora_api::telemetry;
use aurora_catalog::application::loader::load_catalog;
use aurora_gateway::elevenlabs::ElevenLabsClient;
use aurora_gateway::gemini::GeminiClient;
use aurora_store::pg_key_value_store::PgKeyValueStore;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!("Starting Aurora API server");

    let catalog = load_catalog(&config.catalog_path)?;

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    let store = PgKeyValueStore::new(pool);
    store.ensure_schema().await?;

    let generator = GeminiClient::new(config.gemini.clone())
        .map_err(|e| AppError::Config(format!("generation gateway: {e}")))?;
    let narrator = ElevenLabsClient::new(config.elevenlabs.clone())
        .map_err(|e| AppError::Config(format!("narration gateway: {e}")))?;
    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; tour generation will fail");
    }
    if config.elevenlabs.api_key.is_none() {
        tracing::warn!("ELEVENLABS_API_KEY is not set; narration is unavailable");
    }

    let app_state = AppState::new(
        catalog,
        Arc::new(store),
        Arc::new(generator),
        Arc::new(narrator),
    )
    .with_session_idle_timeout(config.session_idle_timeout);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = aurora_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
