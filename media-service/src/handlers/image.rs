use crate::dtos::{GenerateImageRequest, ImageResponse};
use crate::services::providers::ImageInput;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

pub async fn generate_image(
    State(state): State<AppState>,
    Json(body): Json<GenerateImageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = body
        .prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("prompt is required")))?;

    let image = body.image.as_deref().map(ImageInput::parse);

    tracing::info!(
        prompt_len = prompt.len(),
        model_key = body.model_key.as_deref().unwrap_or("default"),
        has_image = image.is_some(),
        "Image generation requested"
    );

    let generated = state
        .image
        .generate(prompt, image.as_ref(), body.model_key.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Image generation failed");
            e
        })?;

    Ok(Json(ImageResponse { image: generated }))
}
