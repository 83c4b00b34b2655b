use crate::dtos::{CountFacesRequest, FaceCountResponse};
use crate::services::providers::ImageInput;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Fallback count when anything in the pipeline fails.
const DEFAULT_COUNT: i64 = 1;

/// Face counting is fail-open: every failure category (bad body, missing
/// credentials, transport, parsing) is downgraded to a 200 with the
/// default count. This mirrors the other handlers' pipeline but not
/// their fail-closed policy; the asymmetry is intentional and documented
/// in DESIGN.md.
pub async fn count_faces(
    State(state): State<AppState>,
    body: Option<Json<CountFacesRequest>>,
) -> Json<FaceCountResponse> {
    let count = match try_count(&state, body.map(|Json(b)| b)).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(error = %e, "Face count failed, returning default");
            DEFAULT_COUNT
        }
    };

    Json(FaceCountResponse { count })
}

async fn try_count(state: &AppState, body: Option<CountFacesRequest>) -> Result<i64, AppError> {
    let body = body.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("invalid request body")))?;
    let raw = body
        .image
        .as_deref()
        .filter(|i| !i.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("image is required")))?;

    let image = ImageInput::parse(raw);
    let count = state.faces.count(&image).await?;

    tracing::info!(count = count, "Face count completed");
    Ok(count)
}
