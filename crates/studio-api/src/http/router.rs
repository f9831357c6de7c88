//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Media
        .route("/images/generations", post(handlers::images::generate_image))
        .route("/images/edits", post(handlers::images::edit_image))
        .route("/images/enhancements", post(handlers::images::enhance_image))
        .route("/images/analyses", post(handlers::images::analyze_image))
        .route("/videos/generations", post(handlers::videos::generate_video))
        // Operation names contain slashes (models/.../operations/...),
        // hence the wildcard segment.
        .route(
            "/videos/operations/{*name}",
            get(handlers::videos::check_operation),
        )
        // Prompt builder
        .route(
            "/promptbot/sessions",
            post(handlers::promptbot::create_session),
        )
        .route(
            "/promptbot/sessions/{id}",
            get(handlers::promptbot::get_session).delete(handlers::promptbot::delete_session),
        )
        .route(
            "/promptbot/sessions/{id}/start",
            post(handlers::promptbot::start),
        )
        .route(
            "/promptbot/sessions/{id}/answers",
            post(handlers::promptbot::submit_answer),
        )
        .route(
            "/promptbot/sessions/{id}/camera-angle",
            post(handlers::promptbot::set_camera_angle),
        )
        .route(
            "/promptbot/sessions/{id}/custom-input",
            post(handlers::promptbot::set_custom_input),
        )
        .route(
            "/promptbot/sessions/{id}/reset",
            post(handlers::promptbot::reset),
        )
        .route(
            "/promptbot/sessions/{id}/copy",
            post(handlers::promptbot::copy_final_text),
        )
        // Generation history
        .route(
            "/history",
            get(handlers::history::list_history)
                .post(handlers::history::record_history)
                .delete(handlers::history::clear_history),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
