//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::services::ServeDir;

use crate::handlers::health::health;
use crate::handlers::videos::{
    create_video, delete_video, download_video, get_video, list_videos,
};
use crate::metrics::track_http;
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/videos", get(list_videos).post(create_video))
        .route("/videos/:video_id", get(get_video).delete(delete_video))
        .route("/videos/:video_id/download", get(download_video));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    let mut router = Router::new().nest("/api", api_routes).merge(health_routes);

    if let Some(handle) = metrics_handle {
        router = router
            .route("/metrics", get(move || std::future::ready(handle.render())))
            .layer(axum_middleware::from_fn(track_http));
    }

    router
        // The browser control panel; unknown paths fall through to it.
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(axum_middleware::from_fn(request_id))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
