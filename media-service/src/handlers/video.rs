use crate::dtos::{GenerateVideoRequest, VideoResponse};
use crate::services::providers::ImageInput;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

/// Video generation accepts only two aspect ratios. Landscape-ish
/// requests collapse to 16:9, portrait-ish to 9:16 (also the default);
/// anything else is passed through for the upstream to reject.
fn normalize_aspect_ratio(raw: Option<&str>) -> String {
    match raw {
        Some("3:2") => "16:9".to_string(),
        Some("2:3") => "9:16".to_string(),
        Some(other) => other.to_string(),
        None => "9:16".to_string(),
    }
}

pub async fn generate_video(
    State(state): State<AppState>,
    Json(body): Json<GenerateVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = body
        .prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("prompt is required")))?;

    let aspect_ratio = normalize_aspect_ratio(body.aspect_ratio.as_deref());
    let image = body.image.as_deref().map(ImageInput::parse);

    tracing::info!(
        prompt_len = prompt.len(),
        aspect_ratio = %aspect_ratio,
        has_image = image.is_some(),
        "Video generation requested"
    );

    let video = state
        .video
        .generate(prompt, image.as_ref(), &aspect_ratio)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Video generation failed");
            e
        })?;

    Ok(Json(VideoResponse { video }))
}

#[cfg(test)]
mod tests {
    use super::normalize_aspect_ratio;

    #[test]
    fn landscape_requests_map_to_16_9() {
        assert_eq!(normalize_aspect_ratio(Some("3:2")), "16:9");
    }

    #[test]
    fn portrait_requests_map_to_9_16() {
        assert_eq!(normalize_aspect_ratio(Some("2:3")), "9:16");
    }

    #[test]
    fn absent_ratio_defaults_to_portrait() {
        assert_eq!(normalize_aspect_ratio(None), "9:16");
    }

    #[test]
    fn other_ratios_pass_through_unchanged() {
        assert_eq!(normalize_aspect_ratio(Some("16:9")), "16:9");
        assert_eq!(normalize_aspect_ratio(Some("1:1")), "1:1");
    }
}
