use crate::helpers::{parse_sse_events, TestContext, MP3_FRAME_BYTES};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn it_should_preview_a_known_voice() {
    let ctx = TestContext::new();

    let (status, headers, body) = ctx
        .post_json(
            "/api/tts/preview",
            &json!({ "language": "English US", "voice": "Joanna (Female)" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("content-type").unwrap(), "audio/mpeg");
    assert_eq!(body.len(), 20 * MP3_FRAME_BYTES);
    assert_eq!(ctx.client.call_count(), 1);
}

#[tokio::test]
async fn it_should_reject_a_preview_of_an_unknown_voice() {
    let ctx = TestContext::new();

    let (status, _, body) = ctx
        .post_json(
            "/api/tts/preview",
            &json!({ "language": "English US", "voice": "Nobody (Male)" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["message"].as_str().unwrap().contains("Nobody"));
    assert_eq!(ctx.client.call_count(), 0);
}

#[tokio::test]
async fn it_should_stream_progress_and_a_final_artifact() {
    // "one two three four" with max 10 chars splits into 3 chunks
    let ctx = TestContext::with_pipeline(10, vec![]);

    let (status, headers, body) = ctx
        .post_json(
            "/api/tts/generate",
            &json!({
                "text": "one two three four",
                "language": "English US",
                "voice": "Joanna (Female)"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let events = parse_sse_events(&body);
    assert_eq!(events.len(), 4);
    assert_eq!(ctx.client.call_count(), 3);

    // Progress log is cumulative
    assert_eq!(events[0]["status"], "Generating chunk 1/3...");
    assert_eq!(events[0]["terminal"], false);
    assert_eq!(
        events[2]["status"],
        "Generating chunk 1/3...\nGenerating chunk 2/3...\nGenerating chunk 3/3..."
    );

    // 60 frames x 1152 samples at 44.1 kHz ~= 1.56s
    let done = &events[3];
    assert_eq!(done["terminal"], true);
    assert_eq!(done["status"], "Done! Total duration: 0:00:01");
    let audio_url = done["audio_url"].as_str().unwrap();
    assert_eq!(audio_url, done["download_url"].as_str().unwrap());
    assert!(audio_url.starts_with("/api/tts/audio/voice_output_"));

    // The downloadable reference serves the merged bytes
    let (status, headers, audio) = ctx.get(audio_url).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("content-type").unwrap(), "audio/mpeg");
    assert!(headers
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("attachment"));
    assert_eq!(audio.len(), 3 * 20 * MP3_FRAME_BYTES);
}

#[tokio::test]
async fn it_should_abort_on_the_first_failed_chunk() {
    let ctx = TestContext::with_pipeline(10, vec![2]);

    let (status, _, body) = ctx
        .post_json(
            "/api/tts/generate",
            &json!({
                "text": "one two three four",
                "language": "English US",
                "voice": "Joanna (Female)"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let events = parse_sse_events(&body);

    // chunk 1 progress, chunk 2 progress, terminal failure; chunk 3 never runs
    assert_eq!(events.len(), 3);
    assert_eq!(ctx.client.call_count(), 2);

    let last = events.last().unwrap();
    assert_eq!(last["terminal"], true);
    assert_eq!(last["status"], "Failed at chunk 2");
    assert!(last.get("audio_url").is_none());
}

#[tokio::test]
async fn it_should_report_missing_input_without_any_synthesis_call() {
    let ctx = TestContext::new();

    let (status, _, body) = ctx
        .post_json(
            "/api/tts/generate",
            &json!({
                "text": "",
                "language": "English US",
                "voice": "Joanna (Female)"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let events = parse_sse_events(&body);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["terminal"], true);
    assert_eq!(events[0]["status"], "Voice or text missing.");
    assert_eq!(ctx.client.call_count(), 0);
}

#[tokio::test]
async fn it_should_reject_oversized_text_before_starting() {
    let ctx = TestContext::new();

    let (status, _, _) = ctx
        .post_json(
            "/api/tts/generate",
            &json!({
                "text": "a".repeat(100_001),
                "language": "English US",
                "voice": "Joanna (Female)"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ctx.client.call_count(), 0);
}

#[tokio::test]
async fn it_should_reject_path_traversal_in_downloads() {
    let ctx = TestContext::new();
    let (status, _, _) = ctx.get("/api/tts/audio/..%2Fescape.mp3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn it_should_404_an_unknown_audio_file() {
    let ctx = TestContext::new();
    let (status, _, _) = ctx.get("/api/tts/audio/voice_output_nope.mp3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
