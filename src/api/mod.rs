//! HTTP API module
//!
//! This module contains the control endpoints standing in for the app's
//! rate picker, start/stop button, volume slider and help sheet.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/toggle", post(toggle_handler))
        .route("/rate", put(rate_handler))
        .route("/volume", put(volume_handler))
        .route("/cue", post(cue_handler))
        .route("/status", get(status_handler))
        .route("/help", get(help_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
