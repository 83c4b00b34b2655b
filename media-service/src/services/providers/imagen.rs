//! Image generation provider implementation.
//!
//! Handles both Vertex AI image model families: Imagen models take an
//! `instances`/`parameters` payload on `:predict`, Gemini image models a
//! `contents`/`generationConfig` payload on `:generateContent`. The
//! public-facing `modelKey` is resolved through a fixed alias table.

use super::{upstream_error_message, ImageGenerator, ImageInput, ProviderError};
use crate::services::auth::TokenProvider;
use crate::services::extract::{self, IMAGE_SLOTS};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

/// Image provider configuration.
#[derive(Debug, Clone)]
pub struct ImagenConfig {
    pub project_id: String,
    pub region: String,
    /// Model used when no key is supplied or the key is unrecognized.
    pub default_model: String,
}

/// Image provider backed by the Vertex AI generation endpoints.
pub struct VertexImageProvider {
    config: ImagenConfig,
    tokens: Arc<dyn TokenProvider>,
    client: Client,
}

impl VertexImageProvider {
    pub fn new(config: ImagenConfig, tokens: Arc<dyn TokenProvider>) -> Self {
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

    /// Map a public model key to an internal model identifier.
    fn resolve_model(&self, model_key: Option<&str>) -> &str {
        match model_key {
            Some("imagen") => "imagen-3.0-generate-002",
            Some("imagen-fast") => "imagen-3.0-fast-generate-001",
            Some("flash") => "gemini-2.5-flash-image-preview",
            _ => self.config.default_model.as_str(),
        }
    }

    fn api_url(&self, model: &str, method: &str) -> String {
        format!(
            "https://{region}-aiplatform.googleapis.com/v1/projects/{project}/locations/{region}/publishers/google/models/{model}:{method}",
            region = self.config.region,
            project = self.config.project_id,
            model = model,
            method = method,
        )
    }

    fn predict_payload(prompt: &str, image: Option<&ImageInput>) -> serde_json::Value {
        let mut instance = json!({ "prompt": prompt });
        if let Some(image) = image {
            instance["image"] = json!({
                "bytesBase64Encoded": image.data,
                "mimeType": image.mime_type,
            });
        }
        json!({
            "instances": [instance],
            "parameters": { "sampleCount": 1 },
        })
    }

    fn generate_content_payload(prompt: &str, image: Option<&ImageInput>) -> serde_json::Value {
        let mut parts = vec![json!({ "text": prompt })];
        if let Some(image) = image {
            parts.push(json!({
                "inlineData": {
                    "mimeType": image.mime_type,
                    "data": image.data,
                }
            }));
        }
        json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "responseModalities": ["IMAGE"] },
        })
    }
}

#[async_trait]
impl ImageGenerator for VertexImageProvider {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageInput>,
        model_key: Option<&str>,
    ) -> Result<String, ProviderError> {
        let token = self.tokens.bearer_token().await?;
        let model = self.resolve_model(model_key);

        let (method, payload) = if model.starts_with("imagen") {
            ("predict", Self::predict_payload(prompt, image))
        } else {
            ("generateContent", Self::generate_content_payload(prompt, image))
        };

        tracing::debug!(
            model = %model,
            method = %method,
            prompt_len = prompt.len(),
            has_image = image.is_some(),
            "Sending image generation request to Vertex AI"
        );

        let response = self
            .client
            .post(self.api_url(model, method))
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

        let encoded = extract::extract_base64(&body, IMAGE_SLOTS)?;
        Ok(extract::data_uri("image/png", encoded))
    }
}
