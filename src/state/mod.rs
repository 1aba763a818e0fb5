//! State management module
//!
//! This module contains the blink reminder controller, its settings and the
//! shared application state served over HTTP.

pub mod settings;
pub mod timer_state;
pub mod cue_stats;
pub mod blink_controller;
pub mod app_state;

// Re-export main types
pub use settings::{BlinkRate, PlaybackVolume};
pub use timer_state::BlinkingState;
pub use cue_stats::CueStats;
pub use blink_controller::{BlinkController, BlinkStatus};
pub use app_state::AppState;
