//! Permissive CORS handling for browser-facing media endpoints.
//!
//! Every response carries `access-control-allow-origin: *`; preflight
//! requests get a 200 with the full header set and an empty body.

use crate::error::AppError;
use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";
pub const MAX_AGE_SECS: &str = "86400";

/// Stamp the allow-origin header onto every response that passes through.
pub async fn cors_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let mut response = next.run(req).await;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// Handler for `OPTIONS` on the media routes.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (header::ACCESS_CONTROL_MAX_AGE, MAX_AGE_SECS),
        ],
    )
}

/// Route fallback for methods other than `POST`/`OPTIONS`.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
