//! Gemini face counting provider implementation.
//!
//! Sends the image with a fixed counting prompt to a Gemini model and
//! parses the numeric answer out of the first text part.

use super::{upstream_error_message, FaceCounter, ImageInput, ProviderError};
use crate::services::auth::TokenProvider;
use crate::services::extract;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

const FACE_COUNT_PROMPT: &str =
    "How many distinct human faces are in this image? Respond with a single number only.";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub project_id: String,
    pub region: String,
    pub model: String,
}

/// Face counter backed by a Gemini multimodal model on Vertex AI.
pub struct GeminiFaceCounter {
    config: GeminiConfig,
    tokens: Arc<dyn TokenProvider>,
    client: Client,
}

impl GeminiFaceCounter {
    pub fn new(config: GeminiConfig, tokens: Arc<dyn TokenProvider>) -> Self {
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
            "https://{region}-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/publishers/google/models/{model}:generateContent",
            region = self.config.region,
            project = self.config.project_id,
            model = self.config.model,
        )
    }
}

#[async_trait]
impl FaceCounter for GeminiFaceCounter {
    async fn count(&self, image: &ImageInput) -> Result<i64, ProviderError> {
        let token = self.tokens.bearer_token().await?;

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": FACE_COUNT_PROMPT },
                    { "inlineData": { "mimeType": image.mime_type, "data": image.data } },
                ],
            }],
            "generationConfig": { "temperature": 0 },
        });

        tracing::debug!(model = %self.config.model, "Sending face count request to Vertex AI");

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

        let text = extract::first_text_part(&body).unwrap_or("1");
        Ok(extract::parse_count(text))
    }
}
