// src/bin/api_server.rs

use person_rest_api::infra::{config::Settings, logging};
use person_rest_api::{storage, transport, PersonService, PersonStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    logging::init_tracing(&settings);

    tracing::info!(
        service = %settings.app_name,
        version = %settings.app_version,
        storage = settings.storage.as_str(),
        "starting"
    );

    // --- Storage Initialization ---
    let store = storage::connect(&settings).await?;
    tracing::info!(backend = store.backend(), "storage ready");

    // --- Service Initialization ---
    let person_service = PersonService::new(store);
    let bind_addr = settings.bind_addr;
    let app_state = transport::http::AppState::new(person_service, settings);

    // --- API Server Initialization ---
    let app = transport::http::create_app(app_state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("API server listening on http://{}", listener.local_addr()?);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received (Ctrl+C)");
}
