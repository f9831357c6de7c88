//! Image generation, editing, enhancement, and analysis endpoints.
//!
//! All endpoints use the standard `ApiResponse` envelope pattern. Results
//! are recorded in the generation history; a history write failure is
//! logged but never discards an already-generated result.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use studio_infra::gemini::InlineData;
use studio_types::media::{HistoryKind, ImageGenerationRequest, ImageResolution};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

use super::history::save_history;

/// Upper bound on images per generation request.
const MAX_IMAGES_PER_REQUEST: u32 = 4;

// ---------------------------------------------------------------------------
// Request / Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GeneratedImagesResponse {
    /// Generated images as `data:` URLs.
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EditedImageResponse {
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub struct EditImageRequest {
    pub image: InlineData,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceImageRequest {
    pub image: InlineData,
    pub target_resolution: ImageResolution,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    pub image: InlineData,
    pub prompt: String,
    #[serde(default)]
    pub deep: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/images/generations
pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<ImageGenerationRequest>,
) -> Result<Json<ApiResponse<GeneratedImagesResponse>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }
    if request.number_of_images == 0 || request.number_of_images > MAX_IMAGES_PER_REQUEST {
        return Err(AppError::Validation(format!(
            "number_of_images must be between 1 and {MAX_IMAGES_PER_REQUEST}"
        )));
    }

    let images = state.gemini.generate_image(&request).await?;

    if let Some(first) = images.first() {
        save_history(&state, HistoryKind::Image, &request.prompt, first).await;
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        GeneratedImagesResponse { images },
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/images/edits
pub async fn edit_image(
    State(state): State<AppState>,
    Json(request): Json<EditImageRequest>,
) -> Result<Json<ApiResponse<EditedImageResponse>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }

    let image = state.gemini.edit_image(&request.image, &request.prompt).await?;
    save_history(&state, HistoryKind::Edit, &request.prompt, &image).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        EditedImageResponse { image },
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/images/enhancements
pub async fn enhance_image(
    State(state): State<AppState>,
    Json(request): Json<EnhanceImageRequest>,
) -> Result<Json<ApiResponse<EditedImageResponse>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let image = state
        .gemini
        .enhance_image(&request.image, request.target_resolution)
        .await?;
    let prompt = format!("Enhance to {}", request.target_resolution);
    save_history(&state, HistoryKind::Enhancement, &prompt, &image).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        EditedImageResponse { image },
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/images/analyses
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeImageRequest>,
) -> Result<Json<ApiResponse<AnalysisResponse>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }

    let analysis = state
        .gemini
        .analyze_image(&request.image, &request.prompt, request.deep)
        .await?;
    save_history(&state, HistoryKind::Analysis, &request.prompt, &analysis).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        AnalysisResponse { analysis },
        request_id,
        elapsed,
    )))
}
