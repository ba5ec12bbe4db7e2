pub mod client;
pub mod polly;

pub use client::{SynthesisClient, SynthesisError};
pub use polly::PollySynthesisClient;
