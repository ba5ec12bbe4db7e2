pub mod request_id;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, TtsController, VoicesController};
use crate::domain::catalog::VoiceCatalog;
use crate::infrastructure::config::Config;
use self::request_id::request_id_middleware;

/// Build the application router with all routes configured
pub fn build_router(
    catalog: Arc<VoiceCatalog>,
    voices_controller: Arc<VoicesController>,
    tts_controller: Arc<TtsController>,
) -> Router {
    // Catalog routes
    let voices_routes = Router::new()
        .route("/api/voices", get(VoicesController::list_voices))
        .route(
            "/api/voices/:language",
            get(VoicesController::voices_for_language),
        )
        .with_state(voices_controller);

    // TTS routes
    let tts_routes = Router::new()
        .route("/api/tts/preview", post(TtsController::preview))
        .route("/api/tts/generate", post(TtsController::generate))
        .route("/api/tts/audio/:file_name", get(TtsController::download))
        .with_state(tts_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(catalog)
        .merge(voices_routes)
        .merge(tts_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    catalog: Arc<VoiceCatalog>,
    voices_controller: Arc<VoicesController>,
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(catalog, voices_controller, tts_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
