//! Integration tests for the image generation endpoint.

mod common;

use common::{happy_providers, TestApp};
use media_service::services::providers::mock::MockImageGenerator;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn generate_image_returns_data_uri() {
    let app = TestApp::spawn(happy_providers()).await;

    let response = app
        .post_json(
            "/api/generate-image",
            json!({
                "prompt": "a watercolor fox",
                "image": "data:image/jpeg;base64,QUJD",
                "modelKey": "imagen"
            }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["image"], "data:image/png;base64,BBBB");
}

#[tokio::test]
async fn missing_prompt_returns_400() {
    let app = TestApp::spawn(happy_providers()).await;

    let response = app
        .post_json("/api/generate-image", json!({ "modelKey": "flash" }))
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "prompt is required");
}

#[tokio::test]
async fn unrecognized_response_shape_returns_extraction_error() {
    let mut providers = happy_providers();
    providers.image = Arc::new(MockImageGenerator::empty());
    let app = TestApp::spawn(providers).await;

    let response = app
        .post_json("/api/generate-image", json!({ "prompt": "a fox" }))
        .await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["error"],
        "model returned success but no media data found"
    );
}

#[tokio::test]
async fn upstream_error_message_is_surfaced_verbatim() {
    let mut providers = happy_providers();
    providers.image = Arc::new(MockImageGenerator::failing("Model not found"));
    let app = TestApp::spawn(providers).await;

    let response = app
        .post_json("/api/generate-image", json!({ "prompt": "a fox" }))
        .await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Model not found");
}
