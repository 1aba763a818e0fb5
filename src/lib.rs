//! Blink Time - A blink reminder that plays an audible cue at a steady rate
//!
//! This library provides the reminder controller (blink rate, repeating cue
//! timer, volume) together with the HTTP and signal interfaces used to drive
//! it from outside the process.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::BlinkError;
pub use state::{AppState, BlinkController, BlinkRate, BlinkingState, PlaybackVolume};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
