use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
}

/// Service-account credentials and endpoint region for Vertex AI.
///
/// `private_key` arrives the way deployment tooling stores it: possibly
/// quote-wrapped with literal `\n` sequences. It is normalized at the
/// auth layer, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for video generation (e.g., veo-2.0-generate-001)
    pub video_model: String,
    /// Default model for image generation when no modelKey is supplied
    pub image_model: String,
    /// Model for face counting (e.g., gemini-2.0-flash)
    pub face_model: String,
}

impl MediaConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_prod();

        Ok(MediaConfig {
            common: common_config,
            google: GoogleConfig {
                // Empty dev defaults: providers report a configuration
                // error at request time instead of failing startup.
                project_id: get_env("GCP_PROJECT_ID", Some(""), is_prod)?,
                client_email: get_env("GCP_CLIENT_EMAIL", Some(""), is_prod)?,
                private_key: get_env("GCP_PRIVATE_KEY", Some(""), is_prod)?,
                region: get_env("GCP_REGION", Some("us-central1"), is_prod)?,
            },
            models: ModelConfig {
                video_model: get_env("MEDIA_VIDEO_MODEL", Some("veo-2.0-generate-001"), is_prod)?,
                image_model: get_env(
                    "MEDIA_IMAGE_MODEL",
                    Some("gemini-2.5-flash-image-preview"),
                    is_prod,
                )?,
                face_model: get_env("MEDIA_FACE_MODEL", Some("gemini-2.0-flash"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
