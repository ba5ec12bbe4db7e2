// End-to-end tests for the VoiceGen Backend API
//
// These tests drive the real router through tower's `oneshot` with a
// scripted in-memory synthesis client standing in for AWS Polly. Chunk
// artifacts and merged outputs are written to a per-test temp directory,
// so the full chunk -> synthesize -> merge -> download path is exercised
// without any network access.

mod helpers;
mod test_health;
mod test_tts;
