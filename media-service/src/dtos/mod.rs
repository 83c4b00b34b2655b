//! Request and response bodies for the media endpoints.
//!
//! All fields are optional at the serde level; presence of required
//! fields is checked in the handlers so a missing field maps to a 400
//! rather than a deserialization rejection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoRequest {
    /// Optional conditioning image, base64 or data-URI encoded.
    pub image: Option<String>,
    pub prompt: Option<String>,
    pub aspect_ratio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub image: Option<String>,
    pub prompt: Option<String>,
    /// Public-facing model key, resolved through a fixed alias table.
    pub model_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountFacesRequest {
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    /// `data:video/mp4;base64,...`
    pub video: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    /// `data:image/png;base64,...`
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct FaceCountResponse {
    pub count: i64,
}
