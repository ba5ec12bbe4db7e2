use serde::{Deserialize, Serialize};

/// A single synthetic voice as shown to the user.
///
/// `label` is the human-readable name rendered in the UI, `voice_id` is the
/// opaque identifier the synthesis backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceEntry {
    pub label: String,
    pub voice_id: String,
}

/// Static mapping from language name to its available voices.
///
/// Built once at startup and shared read-only across requests. Language and
/// voice order is display order.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    languages: Vec<(String, Vec<VoiceEntry>)>,
}

impl VoiceCatalog {
    pub fn new(languages: Vec<(String, Vec<VoiceEntry>)>) -> Self {
        Self { languages }
    }

    /// Language names in display order.
    pub fn languages(&self) -> Vec<&str> {
        self.languages.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Voices for a language, empty for an unknown language.
    pub fn voices_for(&self, language: &str) -> &[VoiceEntry] {
        self.languages
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, voices)| voices.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve a display label to its backend voice id.
    ///
    /// Matching is exact on the label; the first match wins. Returns `None`
    /// for an unknown language or label.
    pub fn resolve(&self, language: &str, label: &str) -> Option<&str> {
        self.voices_for(language)
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.voice_id.as_str())
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        fn entry(label: &str, voice_id: &str) -> VoiceEntry {
            VoiceEntry {
                label: label.to_string(),
                voice_id: voice_id.to_string(),
            }
        }

        let languages = vec![
            (
                "English US".to_string(),
                vec![
                    entry("Joanna (Female)", "Joanna"),
                    entry("Matthew (Male)", "Matthew"),
                    entry("Ruth (Female)", "Ruth"),
                    entry("Stephen (Male)", "Stephen"),
                    entry("Danielle (Female)", "Danielle"),
                    entry("Gregory (Male)", "Gregory"),
                    entry("Kendra (Female)", "Kendra"),
                    entry("Kimberly (Female)", "Kimberly"),
                    entry("Salli (Female)", "Salli"),
                    entry("Joey (Male)", "Joey"),
                    entry("Justin (Male, Child)", "Justin"),
                    entry("Kevin (Male, Child)", "Kevin"),
                    entry("Ivy (Female, Child)", "Ivy"),
                ],
            ),
            (
                "English UK".to_string(),
                vec![
                    entry("Amy (Female)", "Amy"),
                    entry("Emma (Female)", "Emma"),
                    entry("Brian (Male)", "Brian"),
                    entry("Arthur (Male)", "Arthur"),
                ],
            ),
            (
                "Spanish".to_string(),
                vec![
                    entry("Lucia (Female)", "Lucia"),
                    entry("Sergio (Male)", "Sergio"),
                    entry("Conchita (Female)", "Conchita"),
                    entry("Enrique (Male)", "Enrique"),
                ],
            ),
            (
                "French".to_string(),
                vec![
                    entry("Lea (Female)", "Lea"),
                    entry("Remi (Male)", "Remi"),
                    entry("Celine (Female)", "Celine"),
                    entry("Mathieu (Male)", "Mathieu"),
                ],
            ),
            (
                "German".to_string(),
                vec![
                    entry("Vicki (Female)", "Vicki"),
                    entry("Daniel (Male)", "Daniel"),
                    entry("Marlene (Female)", "Marlene"),
                    entry("Hans (Male)", "Hans"),
                ],
            ),
            (
                "Italian".to_string(),
                vec![
                    entry("Bianca (Female)", "Bianca"),
                    entry("Adriano (Male)", "Adriano"),
                    entry("Carla (Female)", "Carla"),
                    entry("Giorgio (Male)", "Giorgio"),
                ],
            ),
            (
                "Portuguese".to_string(),
                vec![
                    entry("Ines (Female)", "Ines"),
                    entry("Cristiano (Male)", "Cristiano"),
                    entry("Camila (Female)", "Camila"),
                    entry("Vitoria (Female)", "Vitoria"),
                    entry("Thiago (Male)", "Thiago"),
                    entry("Ricardo (Male)", "Ricardo"),
                ],
            ),
            (
                "Hindi".to_string(),
                vec![entry("Kajal (Female)", "Kajal"), entry("Aditi (Female)", "Aditi")],
            ),
        ];

        Self::new(languages)
    }
}
