//! Mock provider implementations for testing.

use super::{FaceCounter, ImageGenerator, ImageInput, ProviderError, VideoGenerator};
use crate::services::auth::TokenProvider;
use async_trait::async_trait;

/// Canned outcome for the media-producing mocks.
#[derive(Debug, Clone)]
enum Reply {
    Media(String),
    Upstream(String),
    NoMedia,
    NotConfigured,
}

impl Reply {
    fn to_result(&self) -> Result<String, ProviderError> {
        match self {
            Reply::Media(uri) => Ok(uri.clone()),
            Reply::Upstream(msg) => Err(ProviderError::ApiError(msg.clone())),
            Reply::NoMedia => Err(ProviderError::NoMedia),
            Reply::NotConfigured => Err(ProviderError::NotConfigured),
        }
    }
}

/// Mock token provider for testing.
pub struct MockTokenProvider {
    token: Option<String>,
}

impl MockTokenProvider {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }

    pub fn unconfigured() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for MockTokenProvider {
    async fn bearer_token(&self) -> Result<String, ProviderError> {
        self.token.clone().ok_or(ProviderError::NotConfigured)
    }
}

/// Mock video generator for testing.
pub struct MockVideoGenerator {
    reply: Reply,
}

impl MockVideoGenerator {
    pub fn with_media(uri: &str) -> Self {
        Self {
            reply: Reply::Media(uri.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Upstream(message.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self {
            reply: Reply::NoMedia,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            reply: Reply::NotConfigured,
        }
    }
}

#[async_trait]
impl VideoGenerator for MockVideoGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _image: Option<&ImageInput>,
        _aspect_ratio: &str,
    ) -> Result<String, ProviderError> {
        self.reply.to_result()
    }
}

/// Mock image generator for testing.
pub struct MockImageGenerator {
    reply: Reply,
}

impl MockImageGenerator {
    pub fn with_media(uri: &str) -> Self {
        Self {
            reply: Reply::Media(uri.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Upstream(message.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self {
            reply: Reply::NoMedia,
        }
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _image: Option<&ImageInput>,
        _model_key: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.reply.to_result()
    }
}

/// Mock face counter for testing.
pub struct MockFaceCounter {
    result: Result<i64, String>,
}

impl MockFaceCounter {
    pub fn with_count(count: i64) -> Self {
        Self { result: Ok(count) }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl FaceCounter for MockFaceCounter {
    async fn count(&self, _image: &ImageInput) -> Result<i64, ProviderError> {
        self.result
            .clone()
            .map_err(ProviderError::ApiError)
    }
}
