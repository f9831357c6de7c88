//! REST API handlers for the guided prompt builder.
//!
//! Each session is a [`StudioBot`] held in the in-memory registry. A
//! mutating request locks the session, applies the operation (including
//! any provider call the flow requires), and returns the full session
//! view; the client re-renders from that snapshot.
//!
//! All endpoints use the standard `ApiResponse` envelope pattern.

use std::sync::Mutex;
use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studio_core::clipboard::Clipboard;
use studio_core::promptbot::PromptSession;
use studio_types::chat::ChatTurn;
use studio_types::error::ClipboardError;
use studio_types::prompt::{AnswerSet, CameraAngle, FlowState};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response DTOs
// ---------------------------------------------------------------------------

/// Full snapshot of a prompt-builder session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub flow: FlowState,
    pub transcript: Vec<ChatTurn>,
    pub options: Vec<String>,
    pub answers: AnswerSet,
    pub camera_angle: CameraAngle,
    pub fetching_options: bool,
    pub synthesizing: bool,
    pub custom_input_active: bool,
}

impl SessionView {
    fn from_session(id: Uuid, session: &PromptSession) -> Self {
        Self {
            session_id: id.to_string(),
            flow: session.flow(),
            transcript: session.transcript().turns().to_vec(),
            options: session.options().to_vec(),
            answers: session.answers().clone(),
            camera_angle: session.camera_angle(),
            fetching_options: session.fetching_options(),
            synthesizing: session.synthesizing(),
            custom_input_active: session.custom_input_active(),
        }
    }
}

/// Request body for `start` and `answers`: the user's text.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CameraAngleRequest {
    pub camera_angle: CameraAngle,
}

#[derive(Debug, Deserialize)]
pub struct CustomInputRequest {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    pub turn_index: usize,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub turn_index: usize,
    /// The copied prompt text, for the client's own clipboard write.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// Clipboard port implementation that captures the written text for the
/// response body (the real clipboard lives on the client).
#[derive(Default)]
struct CaptureClipboard {
    captured: Mutex<Option<String>>,
}

impl CaptureClipboard {
    fn take(&self) -> Option<String> {
        self.captured.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Clipboard for CaptureClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self
            .captured
            .lock()
            .map_err(|_| ClipboardError::Write("clipboard capture poisoned".to_string()))?;
        *slot = Some(text.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/promptbot/sessions - Open a fresh session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let id = state.create_session();
    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let view = SessionView::from_session(id, bot.lock().await.session());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// GET /api/v1/promptbot/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let view = SessionView::from_session(id, bot.lock().await.session());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/promptbot/sessions/{id}/start - Submit the initial
/// subject. Blank input is a no-op, mirrored back as an unchanged view.
pub async fn start(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let mut bot = bot.lock().await;
    bot.start(&request.text).await;
    let view = SessionView::from_session(id, bot.session());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/promptbot/sessions/{id}/answers - Answer the current
/// question (suggested option or custom text).
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let mut bot = bot.lock().await;
    bot.select_option(&request.text).await;
    let view = SessionView::from_session(id, bot.session());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/promptbot/sessions/{id}/camera-angle
pub async fn set_camera_angle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CameraAngleRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let mut bot = bot.lock().await;
    bot.set_camera_angle(request.camera_angle);
    let view = SessionView::from_session(id, bot.session());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/promptbot/sessions/{id}/custom-input - Toggle free-text
/// entry mode for the current question.
pub async fn set_custom_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CustomInputRequest>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let mut bot = bot.lock().await;
    if request.active {
        bot.enter_custom_input();
    } else {
        bot.cancel_custom_input();
    }
    let view = SessionView::from_session(id, bot.session());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/promptbot/sessions/{id}/reset - Clear the conversation
/// back to the greeting.
pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let mut bot = bot.lock().await;
    bot.reset();
    let view = SessionView::from_session(id, bot.session());

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/promptbot/sessions/{id}/copy - Validate a copy request
/// against the session and return the final prompt text.
pub async fn copy_final_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CopyRequest>,
) -> Result<Json<ApiResponse<CopyResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let bot = state.session(&id).ok_or(AppError::SessionNotFound)?;
    let bot = bot.lock().await;

    let clipboard = CaptureClipboard::default();
    let receipt = bot.copy_final_text(request.turn_index, &clipboard)?;
    let text = clipboard
        .take()
        .ok_or_else(|| AppError::Internal("copied text missing from capture".to_string()))?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        CopyResponse {
            turn_index: receipt.turn_index,
            text,
        },
        request_id,
        elapsed,
    )))
}

/// DELETE /api/v1/promptbot/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if !state.remove_session(&id) {
        return Err(AppError::SessionNotFound);
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        DeletedResponse { deleted: true },
        request_id,
        elapsed,
    )))
}
