pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::storage::StorageService;
use crate::services::video_service::VideoService;
use axum::{Router, middleware::from_fn, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::videos::list::list_videos,
        api::handlers::videos::download::get_video,
        api::handlers::videos::upload::upload_video,
        api::handlers::videos::manage::delete_video,
        api::handlers::videos::manage::update_video,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::videos::VideoRecord,
            api::handlers::videos::UploadVideoForm,
            api::handlers::videos::UpdateVideoRequest,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video storage endpoints"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageService>,
    pub video_service: Arc<VideoService>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        storage: Arc<dyn StorageService>,
        config: AppConfig,
    ) -> Self {
        let video_service = Arc::new(VideoService::new(db.clone(), storage.clone()));
        Self {
            db,
            storage,
            video_service,
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/videos",
            get(api::handlers::videos::list_videos).post(api::handlers::videos::upload_video),
        )
        // One segment serves both lookups: a filename for GET, a numeric id for PUT/DELETE
        .route(
            "/videos/:key",
            get(api::handlers::videos::get_video)
                .put(api::handlers::videos::update_video)
                .delete(api::handlers::videos::delete_video),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    info!("📥 {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        info!(
                            "📤 Finished in {:?} with status {}",
                            latency,
                            response.status()
                        );
                    },
                ),
        )
        // Outside the trace layer so every span sees the final request id
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_file_size,
        ))
        .with_state(state)
}
