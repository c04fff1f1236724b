//! HTTP API endpoint handlers.
//!
//! Read-only observation endpoints over the live meeting table. The board
//! itself is never observable here: the server retains no board contents.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::MeetingCode,
    infrastructure::dto::http::{MeetingDetailDto, MeetingSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of live meetings
pub async fn get_meetings(State(state): State<Arc<AppState>>) -> Json<Vec<MeetingSummaryDto>> {
    let meetings = state.registry.meetings().await;

    // Domain Model から DTO への変換
    let summaries: Vec<MeetingSummaryDto> =
        meetings.iter().map(MeetingSummaryDto::from).collect();

    Json(summaries)
}

/// Get meeting detail by code
pub async fn get_meeting_detail(
    State(state): State<Arc<AppState>>,
    Path(meeting_id): Path<String>,
) -> Result<Json<MeetingDetailDto>, StatusCode> {
    let code = MeetingCode::new(meeting_id).map_err(|_| StatusCode::NOT_FOUND)?;
    match state.registry.meeting(&code).await {
        Some(meeting) => Ok(Json(MeetingDetailDto::from(&meeting))),
        None => Err(StatusCode::NOT_FOUND),
    }
}
