pub mod health;
pub mod tts;
pub mod voices;

pub use tts::TtsController;
pub use voices::VoicesController;
