use crate::domain::tts::DEFAULT_MAX_CHUNK_CHARS;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    pub environment: Environment,
    pub log_format: LogFormat,
    // TTS pipeline tuning
    pub max_chunk_chars: usize,
    pub chunk_pause_ms: u64,
    pub synthesis_timeout_secs: u64,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "7860".to_string())
                .parse()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            max_chunk_chars: env::var("TTS_MAX_CHUNK_CHARS")
                .unwrap_or_else(|_| DEFAULT_MAX_CHUNK_CHARS.to_string())
                .parse()?,
            chunk_pause_ms: env::var("TTS_CHUNK_PAUSE_MS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            synthesis_timeout_secs: env::var("TTS_SYNTHESIS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            output_dir: env::var("TTS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
