pub mod api;
pub mod sse;
pub mod ui;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(api::handle_healthz))
        // Dashboard UI
        .route("/ui/", get(ui::handle_dashboard))
        .route("/ui/regions/{region}", get(ui::handle_region))
        .route("/ui/alerts/refresh", post(ui::handle_refresh_alerts))
        .route("/ui/logs", get(ui::handle_logs))
        .route("/ui/events", get(sse::handle_region_events))
        // Static files
        .nest_service("/ui/static", ServeDir::new("static"))
        // Root redirect
        .route(
            "/",
            get(|| async {
                axum::response::Redirect::to("/ui/")
            }),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
