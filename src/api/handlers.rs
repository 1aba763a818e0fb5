//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::BlinkError,
    state::{AppState, BlinkRate, PlaybackVolume},
};
use super::responses::{
    ApiResponse, ErrorResponse, HealthResponse, HelpResponse, RateRequest, StartRequest,
    StatusResponse, VolumeRequest,
};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(context: &str, e: String) -> ApiError {
    error!("{}: {}", context, e);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(e)))
}

fn bad_request(e: BlinkError) -> ApiError {
    warn!("Rejected request: {}", e);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
}

fn malformed_body(rejection: JsonRejection) -> ApiError {
    let reason = rejection.body_text();
    warn!("Rejected request body: {}", reason);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(reason)))
}

/// Handle POST /start - Start the reminder, optionally at a new rate
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let request = match body {
        Ok(Json(request)) => request,
        // A bare POST carries no JSON and means "start at the selected rate"
        Err(JsonRejection::MissingJsonContentType(_)) => StartRequest::default(),
        Err(rejection) => return Err(malformed_body(rejection)),
    };
    let rate = match request.rate {
        Some(per_minute) => Some(BlinkRate::try_from(per_minute).map_err(bad_request)?),
        None => None,
    };

    let blink = state.start(rate)
        .map_err(|e| internal_error("Failed to start reminder", e))?;
    info!("Start endpoint called - reminder running at {}", blink.rate);
    Ok(Json(ApiResponse::from_state(
        format!("Blink reminder started at {}", blink.rate),
        blink,
    )))
}

/// Handle POST /stop - Stop the reminder
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let blink = state.stop()
        .map_err(|e| internal_error("Failed to stop reminder", e))?;
    info!("Stop endpoint called - reminder stopped");
    Ok(Json(ApiResponse::from_state("Blink reminder stopped".to_string(), blink)))
}

/// Handle POST /toggle - Start/stop button
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let blink = state.toggle()
        .map_err(|e| internal_error("Failed to toggle reminder", e))?;
    let message = format!("Blink reminder {}", if blink.state.is_running() { "started" } else { "stopped" });
    Ok(Json(ApiResponse::from_state(message, blink)))
}

/// Handle PUT /rate - Select the blink rate for the next start
pub async fn rate_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(request) = body.map_err(malformed_body)?;
    let rate = BlinkRate::try_from(request.rate).map_err(bad_request)?;
    let blink = state.select_rate(rate)
        .map_err(|e| internal_error("Failed to select rate", e))?;
    Ok(Json(ApiResponse::from_state(format!("Blink rate set to {}", rate), blink)))
}

/// Handle PUT /volume - Adjust cue volume, including a clip still sounding
pub async fn volume_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VolumeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(request) = body.map_err(malformed_body)?;
    let volume = PlaybackVolume::new(request.volume).map_err(bad_request)?;
    let blink = state.set_volume(volume)
        .map_err(|e| internal_error("Failed to set volume", e))?;
    Ok(Json(ApiResponse::from_state(format!("Volume set to {}", volume), blink)))
}

/// Handle POST /cue - Play the cue once
pub async fn cue_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let (played, blink) = state.play_cue().await
        .map_err(|e| internal_error("Failed to play cue", e))?;
    let message = if played {
        "Cue played".to_string()
    } else {
        format!(
            "Cue skipped: {}",
            blink.cues.last_error.as_deref().unwrap_or("playback unavailable")
        )
    };
    Ok(Json(ApiResponse::from_state(message, blink)))
}

/// Handle GET /status - Return current reminder status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let blink = state.get_status()
        .map_err(|e| internal_error("Failed to get status", e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        blink,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /help - Describe the controls
pub async fn help_handler() -> Json<HelpResponse> {
    Json(HelpResponse::new())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
