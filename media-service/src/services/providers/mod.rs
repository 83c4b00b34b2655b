//! Vertex AI provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for the upstream
//! generative model calls, allowing easy swapping between the real
//! Vertex AI backends and mocks in tests.

pub mod gemini;
pub mod imagen;
pub mod mock;
pub mod veo;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Server credentials not configured")]
    NotConfigured,

    #[error("{0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("model returned success but no media data found")]
    NoMedia,
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured => {
                AppError::ConfigError(anyhow::anyhow!("Server credentials not configured"))
            }
            ProviderError::ApiError(msg) => AppError::Upstream(msg),
            ProviderError::NetworkError(msg) => AppError::Upstream(msg),
            ProviderError::NoMedia => AppError::Extraction,
        }
    }
}

/// An input image, decoded from either a raw base64 string or a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Base64 payload with any data-URI prefix stripped.
    pub data: String,
    pub mime_type: String,
}

impl ImageInput {
    /// Accepts `data:<mime>;base64,<payload>` or a bare base64 string.
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("data:") {
            if let Some((mime, data)) = rest.split_once(";base64,") {
                return Self {
                    data: data.to_string(),
                    mime_type: if mime.is_empty() {
                        "image/png".to_string()
                    } else {
                        mime.to_string()
                    },
                };
            }
        }

        Self {
            data: raw.to_string(),
            mime_type: "image/png".to_string(),
        }
    }
}

/// Trait for video generation providers (e.g., Veo on Vertex AI).
///
/// Returns the generated video as a `data:video/mp4;base64,...` URI.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageInput>,
        aspect_ratio: &str,
    ) -> Result<String, ProviderError>;
}

/// Trait for image generation providers (Imagen or Gemini image models).
///
/// Returns the generated image as a `data:image/png;base64,...` URI.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        image: Option<&ImageInput>,
        model_key: Option<&str>,
    ) -> Result<String, ProviderError>;
}

/// Trait for face counting providers (Gemini multimodal models).
#[async_trait]
pub trait FaceCounter: Send + Sync {
    async fn count(&self, image: &ImageInput) -> Result<i64, ProviderError>;
}

/// Build the error message for a non-2xx upstream response: the upstream
/// `error.message` verbatim when the body carries one, else a generic
/// status line.
pub(crate) fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| format!("Upstream request failed with status {}", status))
}
