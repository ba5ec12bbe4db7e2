use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicegen_backend::controllers::{TtsController, VoicesController};
use voicegen_backend::domain::catalog::VoiceCatalog;
use voicegen_backend::domain::tts::{PipelineSettings, TtsPipeline};
use voicegen_backend::infrastructure::config::{Config, LogFormat};
use voicegen_backend::infrastructure::http::start_http_server;
use voicegen_backend::infrastructure::synthesis::PollySynthesisClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting VoiceGen Backend on {}:{}",
        config.host,
        config.port
    );

    // Create AWS Polly client
    tracing::info!(
        "Initializing AWS Polly client with region: {}",
        config.aws_region
    );

    // Check for AWS credentials in environment (for debugging)
    let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
    let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
    tracing::info!(
        has_access_key_id = has_access_key,
        has_secret_access_key = has_secret_key,
        "AWS credentials environment check"
    );

    if !has_access_key || !has_secret_key {
        tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
    }

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;
    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    tracing::info!("AWS Polly client initialized successfully");

    let config = Arc::new(config);

    // Voice catalog: static, read-only, shared across requests
    let catalog = Arc::new(VoiceCatalog::default());
    tracing::info!(
        languages = catalog.languages().len(),
        "Voice catalog loaded"
    );

    // Synthesis client and pipeline
    let synthesis_client = Arc::new(PollySynthesisClient::new(
        polly_client,
        Duration::from_secs(config.synthesis_timeout_secs),
    ));
    let pipeline = Arc::new(TtsPipeline::new(
        catalog.clone(),
        synthesis_client,
        PipelineSettings {
            max_chunk_chars: config.max_chunk_chars,
            chunk_pause: Duration::from_millis(config.chunk_pause_ms),
            output_dir: config.output_dir.clone(),
        },
    ));

    // Controllers
    let voices_controller = Arc::new(VoicesController::new(catalog.clone()));
    let tts_controller = Arc::new(TtsController::new(pipeline));

    // Start HTTP server with all routes
    start_http_server(config, catalog, voices_controller, tts_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicegen_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicegen_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
