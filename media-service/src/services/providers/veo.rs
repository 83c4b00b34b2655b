//! Veo video generation provider implementation.
//!
//! Sends a single `:predict` call to the regional Vertex AI endpoint and
//! normalizes the response into a `data:video/mp4` URI.

use super::{upstream_error_message, ImageInput, ProviderError, VideoGenerator};
use crate::services::auth::TokenProvider;
use crate::services::extract::{self, VIDEO_SLOTS};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

/// Veo provider configuration.
#[derive(Debug, Clone)]
pub struct VeoConfig {
    pub project_id: String,
    pub region: String,
    pub model: String,
}

/// Veo video provider backed by the Vertex AI prediction endpoint.
pub struct VertexVideoProvider {
    config: VeoConfig,
    tokens: Arc<dyn TokenProvider>,
    client: Client,
}

impl VertexVideoProvider {
    pub fn new(config: VeoConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            tokens,
            client,
        }
    }

    fn api_url(&self) -> String {
        format!(
            "https://{region}-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/publishers/google/models/{model}:predict",
            region = self.config.region,
            project = self.config.project_id,
            model = self.config.model,
        )
    }
}

#[async_trait]
impl VideoGenerator for VertexVideoProvider {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageInput>,
        aspect_ratio: &str,
    ) -> Result<String, ProviderError> {
        let token = self.tokens.bearer_token().await?;

        let mut instance = json!({ "prompt": prompt });
        if let Some(image) = image {
            instance["image"] = json!({
                "bytesBase64Encoded": image.data,
                "mimeType": image.mime_type,
            });
        }
        let payload = json!({
            "instances": [instance],
            "parameters": {
                "aspectRatio": aspect_ratio,
                "sampleCount": 1,
            },
        });

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            aspect_ratio = %aspect_ratio,
            has_image = image.is_some(),
            "Sending video generation request to Vertex AI"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(upstream_error_message(
                status, &body,
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let encoded = extract::extract_base64(&body, VIDEO_SLOTS)?;
        Ok(extract::data_uri("video/mp4", encoded))
    }
}
