//! Integration tests for the health endpoint.

mod common;

use common::{happy_providers, TestApp};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn(happy_providers()).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "media-service");
}
