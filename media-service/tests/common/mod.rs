use media_service::config::MediaConfig;
use media_service::services::providers::mock::{
    MockFaceCounter, MockImageGenerator, MockVideoGenerator,
};
use media_service::startup::{Application, Providers};
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application on a random port with the given providers.
    pub async fn spawn(providers: Providers) -> Self {
        std::env::set_var("ENVIRONMENT", "test");

        let mut config = MediaConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing

        let app = Application::with_providers(config, providers)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp { address, client }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }
}

/// Providers where every upstream call succeeds with a fixed payload.
pub fn happy_providers() -> Providers {
    Providers {
        video: Arc::new(MockVideoGenerator::with_media("data:video/mp4;base64,AAAA")),
        image: Arc::new(MockImageGenerator::with_media("data:image/png;base64,BBBB")),
        faces: Arc::new(MockFaceCounter::with_count(1)),
    }
}
