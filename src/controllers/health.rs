use crate::domain::catalog::VoiceCatalog;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(catalog): State<Arc<VoiceCatalog>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "languages": catalog.languages().len(),
            "tts": "available"
        })),
    )
}
