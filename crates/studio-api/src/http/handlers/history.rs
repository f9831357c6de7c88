//! Generation-history endpoints.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use studio_core::history::HistoryStore;
use studio_types::media::{HistoryEntry, HistoryKind};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Record a generation result, logging instead of failing: history is a
/// convenience layer and must never discard an already-generated result.
pub(super) async fn save_history(state: &AppState, kind: HistoryKind, prompt: &str, payload: &str) {
    let entry = HistoryEntry {
        id: Uuid::now_v7(),
        kind,
        prompt: prompt.to_string(),
        payload: payload.to_string(),
        created_at: Utc::now(),
    };
    if let Err(e) = state.history.save(&entry).await {
        warn!(error = %e, kind = %kind, "failed to record history entry");
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordHistoryRequest {
    pub kind: HistoryKind,
    pub prompt: String,
    pub payload: String,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: bool,
}

/// GET /api/v1/history - All entries, newest first.
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entries = state.history.load().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(entries, request_id, elapsed)))
}

/// POST /api/v1/history - Record a client-observed result (finished
/// videos, whose prompt the server does not hold across polls).
pub async fn record_history(
    State(state): State<AppState>,
    Json(request): Json<RecordHistoryRequest>,
) -> Result<Json<ApiResponse<HistoryEntry>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entry = HistoryEntry {
        id: Uuid::now_v7(),
        kind: request.kind,
        prompt: request.prompt,
        payload: request.payload,
        created_at: Utc::now(),
    };
    state.history.save(&entry).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(entry, request_id, elapsed)))
}

/// DELETE /api/v1/history - Remove all entries.
pub async fn clear_history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ClearedResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.history.clear().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        ClearedResponse { cleared: true },
        request_id,
        elapsed,
    )))
}
