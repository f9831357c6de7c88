//! Video generation endpoints.
//!
//! Video generation is fire-and-poll: POST starts a long-running provider
//! operation, GET refreshes it by name until `done` with a download URI.
//! Finished videos are recorded in history by the client via
//! `POST /history` (the server does not hold the prompt across polls).

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use studio_infra::gemini::InlineData;
use studio_types::media::{VideoAspectRatio, VideoOperation, VideoResolution};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateVideoRequest {
    pub prompt: String,
    pub aspect_ratio: VideoAspectRatio,
    pub resolution: VideoResolution,
    /// Optional starting frame.
    pub image: Option<InlineData>,
}

/// POST /api/v1/videos/generations
pub async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> Result<Json<ApiResponse<VideoOperation>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }

    let operation = state
        .gemini
        .generate_video(
            &request.prompt,
            request.aspect_ratio,
            request.resolution,
            request.image.as_ref(),
        )
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(operation, request_id, elapsed)))
}

/// GET /api/v1/videos/operations/{*name}
pub async fn check_operation(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<VideoOperation>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let operation = state.gemini.check_video_operation(&name).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(operation, request_id, elapsed)))
}
