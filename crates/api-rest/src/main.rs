//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the clinic REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST
//! server (with OpenAPI/Swagger UI). The workspace's main `clinic-run`
//! binary is the normal entry point.

use std::sync::Arc;

use api_rest::{router, AppState};
use clinic_core::{seed, ClinicService, CoreConfig, MemoryStore};
use clinic_ollama::OllamaClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the clinic REST API server.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CLINIC_OLLAMA_URL`: Ollama base URL (default: "http://localhost:11434")
/// - `CLINIC_OLLAMA_MODEL`: Ollama model name (default: "llama2")
/// - `CLINIC_SEED_DEMO`: Set to "1" to seed demo users at startup
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let ollama_url =
        std::env::var("CLINIC_OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".into());
    let ollama_model = std::env::var("CLINIC_OLLAMA_MODEL").unwrap_or_else(|_| "llama2".into());

    tracing::info!("-- Starting clinic REST API on {}", addr);

    let cfg = CoreConfig::new(ollama_url, ollama_model)?;
    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(OllamaClient::new(&cfg));
    let service = ClinicService::new(store, provider);

    if std::env::var("CLINIC_SEED_DEMO").is_ok_and(|v| v == "1") {
        seed::seed_demo_data(service.store().as_ref())?;
    }

    let app = router(AppState { service });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
