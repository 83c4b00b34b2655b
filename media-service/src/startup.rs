//! Application startup and lifecycle management.

use crate::config::MediaConfig;
use crate::handlers;
use crate::services::auth::{ServiceAccountCredentials, ServiceAccountTokenProvider, TokenProvider};
use crate::services::providers::gemini::{GeminiConfig, GeminiFaceCounter};
use crate::services::providers::imagen::{ImagenConfig, VertexImageProvider};
use crate::services::providers::veo::{VeoConfig, VertexVideoProvider};
use crate::services::providers::{FaceCounter, ImageGenerator, VideoGenerator};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::cors;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: MediaConfig,
    pub video: Arc<dyn VideoGenerator>,
    pub image: Arc<dyn ImageGenerator>,
    pub faces: Arc<dyn FaceCounter>,
}

/// The set of upstream providers the handlers talk to.
pub struct Providers {
    pub video: Arc<dyn VideoGenerator>,
    pub image: Arc<dyn ImageGenerator>,
    pub faces: Arc<dyn FaceCounter>,
}

impl Providers {
    /// Wire the real Vertex AI providers behind a shared token provider.
    pub fn from_config(config: &MediaConfig) -> Self {
        let credentials = ServiceAccountCredentials::from_config(&config.google);
        let tokens: Arc<dyn TokenProvider> = Arc::new(ServiceAccountTokenProvider::new(credentials));

        tracing::info!(
            project = %config.google.project_id,
            region = %config.google.region,
            video_model = %config.models.video_model,
            image_model = %config.models.image_model,
            face_model = %config.models.face_model,
            "Initialized Vertex AI providers"
        );

        Self {
            video: Arc::new(VertexVideoProvider::new(
                VeoConfig {
                    project_id: config.google.project_id.clone(),
                    region: config.google.region.clone(),
                    model: config.models.video_model.clone(),
                },
                tokens.clone(),
            )),
            image: Arc::new(VertexImageProvider::new(
                ImagenConfig {
                    project_id: config.google.project_id.clone(),
                    region: config.google.region.clone(),
                    default_model: config.models.image_model.clone(),
                },
                tokens.clone(),
            )),
            faces: Arc::new(GeminiFaceCounter::new(
                GeminiConfig {
                    project_id: config.google.project_id.clone(),
                    region: config.google.region.clone(),
                    model: config.models.face_model.clone(),
                },
                tokens,
            )),
        }
    }
}

/// Build the service router. The media routes accept `POST` and
/// `OPTIONS`; anything else falls through to a 405.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/generate-video",
            post(handlers::video::generate_video)
                .options(cors::preflight)
                .fallback(cors::method_not_allowed),
        )
        .route(
            "/api/generate-image",
            post(handlers::image::generate_image)
                .options(cors::preflight)
                .fallback(cors::method_not_allowed),
        )
        .route(
            "/api/count-faces",
            post(handlers::faces::count_faces)
                .options(cors::preflight)
                .fallback(cors::method_not_allowed),
        )
        .layer(from_fn(cors::cors_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application with the real Vertex AI providers.
    pub async fn build(config: MediaConfig) -> Result<Self, AppError> {
        let providers = Providers::from_config(&config);
        Self::with_providers(config, providers).await
    }

    /// Build the application with injected providers (used by tests).
    pub async fn with_providers(
        config: MediaConfig,
        providers: Providers,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            video: providers.video,
            image: providers.image,
            faces: providers.faces,
        };

        let app = app_router(state);

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
