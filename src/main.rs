use std::sync::Arc;

use api_rest::{router, AppState};
use clinic_core::{seed, ClinicService, CoreConfig, MemoryStore};
use clinic_ollama::OllamaClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the clinic workflow application.
///
/// Wires the in-memory store and the Ollama completion provider into the
/// workflow service and serves the REST API.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CLINIC_OLLAMA_URL`: Ollama base URL (default: "http://localhost:11434")
/// - `CLINIC_OLLAMA_MODEL`: Ollama model name (default: "llama2")
/// - `CLINIC_SEED_DEMO`: Set to "1" to seed demo users at startup
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CLINIC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let ollama_url =
        std::env::var("CLINIC_OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".into());
    let ollama_model = std::env::var("CLINIC_OLLAMA_MODEL").unwrap_or_else(|_| "llama2".into());

    let cfg = CoreConfig::new(ollama_url, ollama_model)?;
    tracing::info!(
        ollama = cfg.ollama_base_url(),
        model = cfg.ollama_model(),
        "resolved configuration"
    );

    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(OllamaClient::new(&cfg));
    let service = ClinicService::new(store, provider);

    if std::env::var("CLINIC_SEED_DEMO").is_ok_and(|v| v == "1") {
        let seeded = seed::seed_demo_data(service.store().as_ref())?;
        tracing::info!(count = seeded.len(), "demo data seeded");
    }

    let app = router(AppState { service });

    tracing::info!("clinic REST API listening on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
