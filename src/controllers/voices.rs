use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::catalog::{VoiceCatalog, VoiceEntry};

/// Response for GET /api/voices
#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    /// Language names in display order
    pub languages: Vec<String>,
    pub voices: Vec<LanguageVoices>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageVoices {
    pub language: String,
    pub voices: Vec<VoiceEntry>,
}

pub struct VoicesController {
    catalog: Arc<VoiceCatalog>,
}

impl VoicesController {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    /// GET /api/voices - full catalog, display order preserved
    pub async fn list_voices(
        State(controller): State<Arc<VoicesController>>,
    ) -> Json<VoicesResponse> {
        let languages: Vec<String> = controller
            .catalog
            .languages()
            .into_iter()
            .map(str::to_string)
            .collect();

        let voices = languages
            .iter()
            .map(|language| LanguageVoices {
                language: language.clone(),
                voices: controller.catalog.voices_for(language).to_vec(),
            })
            .collect();

        Json(VoicesResponse { languages, voices })
    }

    /// GET /api/voices/:language - voices for one language
    ///
    /// An unknown language yields an empty list, mirroring the catalog
    /// contract, rather than a 404.
    pub async fn voices_for_language(
        State(controller): State<Arc<VoicesController>>,
        Path(language): Path<String>,
    ) -> Json<Vec<VoiceEntry>> {
        Json(controller.catalog.voices_for(&language).to_vec())
    }
}
