use crate::helpers::TestContext;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

#[tokio::test]
async fn it_should_report_healthy() {
    let ctx = TestContext::new();
    let (status, _, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn it_should_report_ready_with_catalog_loaded() {
    let ctx = TestContext::new();
    let (status, _, body) = ctx.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ready");
    assert!(json["languages"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn it_should_attach_a_request_id_header() {
    let ctx = TestContext::new();
    let (_, headers, _) = ctx.get("/health").await;
    assert!(headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn it_should_reuse_a_caller_supplied_request_id() {
    let ctx = TestContext::new();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = ctx.router.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-123"
    );
}
