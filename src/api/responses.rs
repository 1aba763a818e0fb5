//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::BlinkStatus;

/// Body of POST /start; an absent rate means the selected one
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRequest {
    pub rate: Option<u32>,
}

/// Body of PUT /rate
#[derive(Debug, Clone, Deserialize)]
pub struct RateRequest {
    pub rate: u32,
}

/// Body of PUT /volume
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeRequest {
    pub volume: f32,
}

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub blink: BlinkStatus,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, blink: BlinkStatus) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            blink,
        }
    }

    /// Response labelled with the reminder's current state
    pub fn from_state(message: String, blink: BlinkStatus) -> Self {
        let status = if blink.state.is_running() { "running" } else { "stopped" };
        Self::new(status.to_string(), message, blink)
    }
}

/// Error body for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            status: "error".to_string(),
            error,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub blink: BlinkStatus,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// What the app does, one entry per control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpResponse {
    pub title: String,
    pub functionality: Vec<HelpEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpEntry {
    pub control: String,
    pub description: String,
    pub endpoint: String,
}

impl HelpResponse {
    pub fn new() -> Self {
        let entry = |control: &str, description: &str, endpoint: &str| HelpEntry {
            control: control.to_string(),
            description: description.to_string(),
            endpoint: endpoint.to_string(),
        };

        Self {
            title: "App Functionality".to_string(),
            functionality: vec![
                entry(
                    "Adjust Blink Rate",
                    "Choose between 15 blinks per minute or 20 blinks per minute before pressing start.",
                    "PUT /rate",
                ),
                entry(
                    "Start/Stop Blinking",
                    "Start or stop the blink reminder.",
                    "POST /toggle, POST /start, POST /stop",
                ),
                entry(
                    "Volume Control",
                    "Adjust the volume of the reminder sound between 0.0 and 1.0 in steps of 0.1.",
                    "PUT /volume",
                ),
                entry(
                    "Preview",
                    "Play the reminder sound once.",
                    "POST /cue",
                ),
            ],
        }
    }
}

impl Default for HelpResponse {
    fn default() -> Self {
        Self::new()
    }
}
