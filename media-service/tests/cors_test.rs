//! Method dispatch and CORS behavior shared by all media routes.

mod common;

use common::{happy_providers, TestApp};
use serde_json::json;

const MEDIA_ROUTES: &[&str] = &[
    "/api/generate-video",
    "/api/generate-image",
    "/api/count-faces",
];

#[tokio::test]
async fn options_returns_200_with_cors_headers_and_no_body() {
    let app = TestApp::spawn(happy_providers()).await;

    for route in MEDIA_ROUTES {
        let response = app
            .client
            .request(
                reqwest::Method::OPTIONS,
                format!("{}{}", app.address, route),
            )
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 200, "route {}", route);

        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["access-control-max-age"], "86400");

        let body = response.text().await.expect("Failed to read body");
        assert!(body.is_empty(), "preflight body should be empty");
    }
}

#[tokio::test]
async fn non_post_methods_return_405() {
    let app = TestApp::spawn(happy_providers()).await;

    for route in MEDIA_ROUTES {
        for method in [
            reqwest::Method::GET,
            reqwest::Method::PUT,
            reqwest::Method::DELETE,
            reqwest::Method::PATCH,
        ] {
            let response = app
                .client
                .request(method.clone(), format!("{}{}", app.address, route))
                .send()
                .await
                .expect("Failed to send request");

            assert_eq!(response.status(), 405, "{} {}", method, route);

            let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
            assert_eq!(body["error"], "Method not allowed");
        }
    }
}

#[tokio::test]
async fn post_responses_carry_allow_origin_header() {
    let app = TestApp::spawn(happy_providers()).await;

    let response = app
        .post_json("/api/generate-video", json!({ "prompt": "a sunrise" }))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
